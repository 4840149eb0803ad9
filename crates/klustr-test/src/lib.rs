//! klustr-test - Regression test framework for KlustR
//!
//! This crate provides a regression test harness similar in spirit to
//! image-library `*_reg` programs, plus synthetic fixtures:
//!
//! - [`RegParams`]: indexed value/label checks with a SUCCESS/FAILURE report
//! - [`shapes`]: disks, rectangles, rings, decoder polarity, feature clouds
//!
//! # Usage
//!
//! ```ignore
//! use klustr_test::RegParams;
//!
//! let mut rp = RegParams::new("descriptor");
//! rp.compare_values(0.785, roundness, 0.01);
//! assert!(rp.cleanup());
//! ```

mod error;
mod params;
pub mod shapes;

pub use error::{TestError, TestResult};
pub use params::RegParams;
pub use shapes::{decoded, feature_cloud, filled_disk, filled_rectangle, ring, shuffled};
