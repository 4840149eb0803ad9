//! Error types for klustr-shape

use thiserror::Error;

/// Errors that can occur while measuring a shape
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] klustr_core::Error),

    /// No foreground pixels, so there is no centroid
    #[error("degenerate shape: area is zero")]
    ZeroArea,

    /// No foreground/background transitions
    #[error("degenerate shape: perimeter is zero")]
    ZeroPerimeter,

    /// No foreground pixel touches the background
    #[error("degenerate shape: no boundary pixels")]
    NoBoundary,

    /// Every boundary pixel sits on the centroid
    #[error("degenerate shape: maximum boundary radius is zero")]
    ZeroRadius,
}

impl ShapeError {
    /// Whether this error comes from the geometry of the shape itself
    /// rather than from malformed raster input.
    pub fn is_degenerate(&self) -> bool {
        !matches!(self, ShapeError::Core(_))
    }
}

/// Result type for shape operations
pub type ShapeResult<T> = Result<T, ShapeError>;
