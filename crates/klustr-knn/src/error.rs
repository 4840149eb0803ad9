//! Error types for klustr-knn

use thiserror::Error;

/// Errors that can occur while storing points or classifying a query
#[derive(Debug, Error, Clone, PartialEq)]
pub enum KnnError {
    /// Feature vector length differs from the configured dimensionality
    #[error("dimension mismatch: expected {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A feature is NaN or infinite
    #[error("feature {index} is not a finite number")]
    NonFiniteFeature { index: usize },

    /// Category labels must not be empty
    #[error("category label cannot be empty")]
    EmptyLabel,

    /// Invalid configuration value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for KNN operations
pub type KnnResult<T> = Result<T, KnnError>;
