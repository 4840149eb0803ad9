//! Raster - The binary image container
//!
//! A `Raster` is a two-dimensional grid of binary pixels (`0` or `1`),
//! stored row-major with one byte per pixel.
//!
//! # Coordinates
//!
//! Pixel accessors take `(x, y)` where `x` is the column and `y` the row.
//! Shape metrics report positions as `(row, col)` pairs.
//!
//! # Ownership model
//!
//! `Raster` uses `Arc` for cheap cloning (shared, read-only ownership).
//! To modify pixel data, convert to `RasterMut` via [`Raster::try_into_mut`]
//! or [`Raster::to_mut`], then convert back with `Into<Raster>`.
//!
//! # Polarity
//!
//! Decoded dataset images mark the shape with `0` and the background with
//! `1`. Metric code expects the opposite convention, so callers flip the
//! raster once with [`Raster::inverted`] before measuring.

mod access;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Internal raster data
#[derive(Debug, Clone, PartialEq, Eq)]
struct RasterData {
    /// Width in pixels (number of columns)
    width: u32,
    /// Height in pixels (number of rows)
    height: u32,
    /// Row-major pixel values, each 0 or 1
    data: Vec<u8>,
}

impl RasterData {
    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Binary raster image
///
/// # Examples
///
/// ```
/// use klustr_core::Raster;
///
/// let raster = Raster::new(4, 3).unwrap();
/// assert_eq!(raster.width(), 4);
/// assert_eq!(raster.height(), 3);
/// assert_eq!(raster.get_pixel(0, 0), Some(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    inner: Arc<RasterData>,
}

impl Raster {
    /// Create a new raster with every pixel set to 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let data = vec![0u8; width as usize * height as usize];
        Ok(Raster {
            inner: Arc::new(RasterData {
                width,
                height,
                data,
            }),
        })
    }

    /// Create a raster from a row-major buffer of 0/1 values.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimension`] if width or height is 0
    /// - [`Error::DataLengthMismatch`] if `data.len() != width * height`
    /// - [`Error::InvalidPixelValue`] if any value is not 0 or 1
    pub fn from_vec(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::DataLengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        if let Some(&bad) = data.iter().find(|&&v| v > 1) {
            return Err(Error::InvalidPixelValue(bad));
        }
        Ok(Raster {
            inner: Arc::new(RasterData {
                width,
                height,
                data,
            }),
        })
    }

    /// Create a raster from equally sized rows.
    ///
    /// # Errors
    ///
    /// Same as [`Raster::from_vec`]; ragged rows report a length mismatch.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.as_ref().len()) as u32;
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for row in rows {
            data.extend_from_slice(row.as_ref());
        }
        Self::from_vec(width, height, data)
    }

    /// Create a raster by evaluating `f(x, y)` for every pixel.
    ///
    /// `true` maps to 1, `false` to 0.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> bool,
    {
        let mut raster = Self::new(width, height)?.to_mut();
        for y in 0..height {
            for x in 0..width {
                if f(x, y) {
                    raster.set_pixel_unchecked(x, y, 1);
                }
            }
        }
        Ok(raster.into())
    }

    /// Get the raster width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the raster height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Get raw row-major access to the pixel data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the pixels of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = self.inner.offset(0, y);
        &self.inner.data[start..start + self.inner.width as usize]
    }

    /// Iterate over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.inner.data.chunks_exact(self.inner.width as usize)
    }

    /// Number of pixels set to 1.
    pub fn count_ones(&self) -> u64 {
        self.inner.data.iter().map(|&v| u64::from(v)).sum()
    }

    /// Return a polarity-flipped copy (`1 - value` for every pixel).
    pub fn inverted(&self) -> Raster {
        let data = self.inner.data.iter().map(|&v| 1 - v).collect();
        Raster {
            inner: Arc::new(RasterData {
                width: self.inner.width,
                height: self.inner.height,
                data,
            }),
        }
    }

    /// Get the number of strong references to this raster.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Try to take exclusive ownership of the pixel data.
    ///
    /// Succeeds when this is the only reference; otherwise the raster is
    /// handed back unchanged.
    pub fn try_into_mut(self) -> std::result::Result<RasterMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(RasterMut { inner: data }),
            Err(arc) => Err(Raster { inner: arc }),
        }
    }

    /// Create a mutable copy of this raster.
    pub fn to_mut(&self) -> RasterMut {
        RasterMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable binary raster
///
/// Obtained from [`Raster::try_into_mut`] or [`Raster::to_mut`]; converts
/// back into a shareable [`Raster`] with `Into`.
#[derive(Debug)]
pub struct RasterMut {
    inner: RasterData,
}

impl RasterMut {
    /// Get the raster width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the raster height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Set every pixel to `val` (non-zero is stored as 1).
    pub fn fill(&mut self, val: u8) {
        let v = u8::from(val != 0);
        self.inner.data.iter_mut().for_each(|p| *p = v);
    }
}

impl From<RasterMut> for Raster {
    fn from(raster_mut: RasterMut) -> Self {
        Raster {
            inner: Arc::new(raster_mut.inner),
        }
    }
}
