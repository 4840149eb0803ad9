//! Error types for klustr-core
//!
//! Provides a unified error type for raster construction and pixel access.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// klustr-core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid raster dimensions
    #[error("invalid raster dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Pixel coordinates outside the raster
    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} raster")]
    IndexOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// A binary raster only holds 0 or 1
    #[error("invalid binary pixel value: {0}")]
    InvalidPixelValue(u8),

    /// Buffer length does not match `width * height`
    #[error("data length mismatch: expected {expected} pixels, got {actual}")]
    DataLengthMismatch { expected: usize, actual: usize },
}

/// Result type alias for klustr-core operations
pub type Result<T> = std::result::Result<T, Error>;
