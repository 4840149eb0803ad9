//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building test fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// Raster construction failed
    #[error("raster error: {0}")]
    Raster(#[from] klustr_core::Error),

    /// Fixture parameters describe an impossible shape
    #[error("invalid fixture: {0}")]
    InvalidFixture(String),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
