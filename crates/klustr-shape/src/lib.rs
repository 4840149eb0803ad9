//! klustr-shape - Shape measurement for binary rasters
//!
//! This crate provides:
//!
//! - **Shape metrics**: area, perimeter, centroid, boundary pixels and
//!   centroid-to-boundary radii
//! - **Descriptor extraction**: the roundness / circle ratio / density
//!   feature vector of a decoded image
//!
//! # Example
//!
//! ```
//! use klustr_core::Raster;
//! use klustr_shape::{describe, metrics};
//!
//! // 5x5 block inside a 9x9 raster
//! let raster = Raster::from_fn(9, 9, |x, y| (2..7).contains(&x) && (2..7).contains(&y)).unwrap();
//! assert_eq!(metrics::area(&raster), 25);
//! assert_eq!(metrics::perimeter(&raster), 20);
//!
//! let descriptor = describe("square", &raster).unwrap();
//! assert!(descriptor.circle_ratio <= 1.0);
//! ```

pub mod descriptor;
mod error;
pub mod metrics;

pub use descriptor::{DESCRIPTOR_LEN, ShapeDescriptor, describe, extract};
pub use error::{ShapeError, ShapeResult};
pub use metrics::ShapeMetrics;

// Re-export core for convenience
pub use klustr_core;
