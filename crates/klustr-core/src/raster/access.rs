//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.

use super::{Raster, RasterMut};
use crate::error::{Error, Result};

impl Raster {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(self.inner.data[self.inner.offset(x, y)])
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`, or if `x >= width` on the last row.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u8 {
        self.inner.data[self.inner.offset(x, y)]
    }

    /// Get a pixel value with zero padding.
    ///
    /// Coordinates outside the raster (including negative ones) read as 0.
    #[inline]
    pub fn get_pixel_padded(&self, x: i64, y: i64) -> u8 {
        if x < 0 || y < 0 || x >= i64::from(self.inner.width) || y >= i64::from(self.inner.height)
        {
            return 0;
        }
        self.inner.data[self.inner.offset(x as u32, y as u32)]
    }
}

impl RasterMut {
    /// Get a pixel value at (x, y).
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(self.inner.data[self.inner.offset(x, y)])
    }

    /// Set a pixel value at (x, y). Non-zero values are stored as 1.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u8) -> Result<()> {
        if x >= self.inner.width || y >= self.inner.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.inner.width,
                height: self.inner.height,
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the offset falls outside the pixel buffer.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u8) {
        let offset = self.inner.offset(x, y);
        self.inner.data[offset] = u8::from(val != 0);
    }
}
