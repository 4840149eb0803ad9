//! klustr-knn - Labeled feature storage and k-nearest-neighbor classification
//!
//! This crate provides:
//!
//! - **Feature store**: an append-only matrix of labeled feature rows with
//!   an append-only category dictionary
//! - **KNN classifier**: Euclidean k-nearest-neighbor voting with a maximum
//!   admissible distance and a mean-distance tie-break
//! - **Series**: per-category snapshots and a color sequence for plotting
//!
//! # Quick Start
//!
//! ```
//! use klustr_knn::{KnnClassifier, KnnOptions};
//!
//! let mut knn = KnnClassifier::new(&KnnOptions::new().with_k(2).with_dist_max(1.0)).unwrap();
//! knn.add_point("circle", &[0.95, 0.90, 0.80]).unwrap();
//! knn.add_point("circle", &[0.93, 0.88, 0.78]).unwrap();
//! knn.add_point("square", &[0.78, 0.70, 0.90]).unwrap();
//!
//! let result = knn.classify(&[0.94, 0.89, 0.79]).unwrap();
//! assert_eq!(result.label(), Some("circle"));
//! ```

pub mod classify;
mod error;
pub mod options;
pub mod series;
pub mod store;

pub use classify::{Classification, KnnClassifier, NO_ADMISSIBLE_NEIGHBOR, Neighbor};
pub use error::{KnnError, KnnResult};
pub use options::KnnOptions;
pub use series::{CategorySeries, ColorSequence};
pub use store::{CategoryDictionary, FeatureRow, FeatureStore};
