//! Classifier configuration

use crate::error::{KnnError, KnnResult};

/// Default number of neighbors consulted per classification
pub const DEFAULT_K: usize = 3;

/// Default admissibility radius
pub const DEFAULT_DIST_MAX: f64 = 0.8;

/// Default feature dimensionality (roundness, circle ratio, density)
pub const DEFAULT_NB_DETERMINANT: usize = 3;

/// Options for a [`KnnClassifier`](crate::KnnClassifier)
#[derive(Debug, Clone, PartialEq)]
pub struct KnnOptions {
    /// Number of nearest neighbors consulted (default: 3).
    /// Zero is accepted and makes every query unclassifiable.
    pub k: usize,

    /// Neighbors farther than this are never admitted (default: 0.8)
    pub dist_max: f64,

    /// Expected feature count per point, fixed for the classifier's
    /// lifetime (default: 3)
    pub nb_determinant: usize,
}

impl Default for KnnOptions {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            dist_max: DEFAULT_DIST_MAX,
            nb_determinant: DEFAULT_NB_DETERMINANT,
        }
    }
}

impl KnnOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults suited to a dataset of `image_count` images.
    ///
    /// `k` starts at a third of [`max_k_for_dataset`](Self::max_k_for_dataset),
    /// and never below 1.
    pub fn for_dataset(image_count: usize) -> Self {
        Self {
            k: (Self::max_k_for_dataset(image_count) / 3).max(1),
            ..Self::default()
        }
    }

    /// Largest sensible `k` for a dataset: a quarter of its images.
    pub fn max_k_for_dataset(image_count: usize) -> usize {
        image_count / 4
    }

    /// Set the neighbor count
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set the admissibility radius
    pub fn with_dist_max(mut self, dist_max: f64) -> Self {
        self.dist_max = dist_max;
        self
    }

    /// Set the feature dimensionality
    pub fn with_nb_determinant(mut self, nb_determinant: usize) -> Self {
        self.nb_determinant = nb_determinant;
        self
    }

    /// Validate options
    pub fn validate(&self) -> KnnResult<()> {
        validate_dist_max(self.dist_max)?;
        if self.nb_determinant == 0 {
            return Err(KnnError::InvalidParameter(
                "nb_determinant must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

pub(crate) fn validate_dist_max(dist_max: f64) -> KnnResult<()> {
    if !dist_max.is_finite() || dist_max < 0.0 {
        return Err(KnnError::InvalidParameter(format!(
            "dist_max must be a finite non-negative number, got {dist_max}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = KnnOptions::default();
        assert_eq!(opts.k, 3);
        assert_eq!(opts.dist_max, 0.8);
        assert_eq!(opts.nb_determinant, 3);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_for_dataset() {
        // 120 images: k ranges over 0..=30 and starts at 10
        assert_eq!(KnnOptions::max_k_for_dataset(120), 30);
        assert_eq!(KnnOptions::for_dataset(120).k, 10);
        // Tiny datasets still get one neighbor
        assert_eq!(KnnOptions::for_dataset(5).k, 1);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(KnnOptions::new().with_dist_max(-0.1).validate().is_err());
        assert!(KnnOptions::new().with_dist_max(f64::NAN).validate().is_err());
        assert!(
            KnnOptions::new()
                .with_dist_max(f64::INFINITY)
                .validate()
                .is_err()
        );
        assert!(KnnOptions::new().with_nb_determinant(0).validate().is_err());
    }

    #[test]
    fn test_zero_k_is_valid() {
        let opts = KnnOptions::new().with_k(0).with_dist_max(0.0);
        assert!(opts.validate().is_ok());
    }
}
