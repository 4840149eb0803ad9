//! KlustR - Shape descriptors and nearest-neighbor classification
//!
//! # Overview
//!
//! - [`Raster`]: binary image container
//! - [`shape`]: area, perimeter, centroid, boundary radii and the
//!   roundness / circle ratio / density descriptor
//! - [`knn`]: labeled feature store and distance-gated KNN classifier
//! - [`session`]: ingestion of decoded training images and classification
//!   of query images
//!
//! # Example
//!
//! ```
//! use klustr::knn::KnnOptions;
//! use klustr::{Raster, ShapeSession};
//!
//! let mut session = ShapeSession::new(&KnnOptions::new().with_k(1).with_dist_max(1.0)).unwrap();
//!
//! // Decoded images mark the shape with 0
//! let square = Raster::from_fn(20, 20, |x, y| {
//!     !((5..15).contains(&x) && (5..15).contains(&y))
//! })
//! .unwrap();
//! session.ingest("square", &square).unwrap();
//!
//! let result = session.classify_raster(&square).unwrap();
//! assert_eq!(result.label(), Some("square"));
//! ```

pub mod session;

// Re-export core types (primary data structures used everywhere)
pub use klustr_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use klustr_knn as knn;
pub use klustr_shape as shape;

pub use session::{IngestReport, KlustrError, KlustrResult, RejectedImage, ShapeSession};
