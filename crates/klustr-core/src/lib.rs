//! KlustR Core - Basic data structures for shape classification
//!
//! This crate provides the binary raster type consumed by the shape
//! metrics and descriptor extraction crates:
//!
//! - [`Raster`] / [`RasterMut`] - Binary image container (immutable / mutable)
//! - [`Error`] / [`Result`] - Construction and access errors

pub mod error;
pub mod raster;

pub use error::{Error, Result};
pub use raster::{Raster, RasterMut};
