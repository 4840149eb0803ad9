//! Distance-gated k-nearest-neighbor classification
//!
//! A query is classified in sequential stages:
//!
//! 1. Validate the query length against `nb_determinant`
//! 2. Compute the Euclidean distance to every stored row, into a fresh
//!    array parallel to the rows (stored rows are never written)
//! 3. Sort rows by ascending distance and keep the first `k`
//! 4. Drop candidates farther than `dist_max`; if none remain the query
//!    is [`Classification::Unclassifiable`]
//! 5. Count votes per category among the admitted candidates
//! 6. Break a vote tie by the smallest mean admitted distance, then by the
//!    lowest category index
//! 7. Report the winning category's label

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::KnnResult;
use crate::options::{KnnOptions, validate_dist_max};
use crate::store::{FeatureStore, validate_features};

/// Reason reported when no neighbor passes the distance gate
pub const NO_ADMISSIBLE_NEIGHBOR: &str = "no training point within the control distance";

/// One admitted neighbor of a query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Row index in the feature store
    pub row: usize,
    /// Category index of that row
    pub category: usize,
    /// Euclidean distance to the query
    pub distance: f64,
}

/// Outcome of a classification
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// The query was assigned a category
    Classified {
        /// Label of the winning category
        label: String,
        /// Index of the winning category
        category: usize,
        /// Admitted neighbors voting for the winner
        votes: usize,
        /// Mean distance of those neighbors
        mean_distance: f64,
    },
    /// No neighbor lies within `dist_max`
    Unclassifiable {
        /// Human-readable explanation
        reason: String,
    },
}

impl Classification {
    /// The assigned label, if any
    pub fn label(&self) -> Option<&str> {
        match self {
            Classification::Classified { label, .. } => Some(label),
            Classification::Unclassifiable { .. } => None,
        }
    }

    /// Whether a category was assigned
    pub fn is_classified(&self) -> bool {
        matches!(self, Classification::Classified { .. })
    }
}

/// K-nearest-neighbor classifier over a [`FeatureStore`]
#[derive(Debug, Clone)]
pub struct KnnClassifier {
    store: FeatureStore,
    k: usize,
    dist_max: f64,
}

impl KnnClassifier {
    /// Create an empty classifier.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::InvalidParameter`](crate::KnnError::InvalidParameter)
    /// if the options do not validate.
    pub fn new(options: &KnnOptions) -> KnnResult<Self> {
        options.validate()?;
        Ok(Self {
            store: FeatureStore::new(options.nb_determinant)?,
            k: options.k,
            dist_max: options.dist_max,
        })
    }

    /// Number of neighbors consulted
    pub fn k(&self) -> usize {
        self.k
    }

    /// Change the neighbor count for future queries
    pub fn set_k(&mut self, k: usize) {
        self.k = k;
    }

    /// Admissibility radius
    pub fn dist_max(&self) -> f64 {
        self.dist_max
    }

    /// Change the admissibility radius for future queries.
    ///
    /// # Errors
    ///
    /// Rejects negative, NaN or infinite values and keeps the old radius.
    pub fn set_dist_max(&mut self, dist_max: f64) -> KnnResult<()> {
        validate_dist_max(dist_max)?;
        self.dist_max = dist_max;
        Ok(())
    }

    /// Expected number of features per point
    pub fn nb_determinant(&self) -> usize {
        self.store.nb_determinant()
    }

    /// Read-only access to the training data
    pub fn store(&self) -> &FeatureStore {
        &self.store
    }

    /// Add one labeled training point, returning its row index.
    ///
    /// # Errors
    ///
    /// See [`FeatureStore::append_row`].
    pub fn add_point(&mut self, label: &str, features: &[f64]) -> KnnResult<usize> {
        self.store.append_row(label, features)
    }

    /// Distance from `query` to every stored row, in row order.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the query has the wrong length or
    /// non-finite values.
    pub fn distances(&self, query: &[f64]) -> KnnResult<Vec<f64>> {
        validate_features(self.store.nb_determinant(), query)?;
        Ok(self
            .store
            .rows()
            .map(|row| euclidean(row.features, query))
            .collect())
    }

    /// The `k` nearest rows that lie within `dist_max`, nearest first.
    ///
    /// Rows at equal distance keep their insertion order.
    ///
    /// # Errors
    ///
    /// Same as [`distances`](Self::distances).
    pub fn neighbors(&self, query: &[f64]) -> KnnResult<Vec<Neighbor>> {
        let distances = self.distances(query)?;

        let mut order: Vec<usize> = (0..distances.len()).collect();
        order.sort_by(|&a, &b| distances[a].total_cmp(&distances[b]));

        let neighbors = order
            .into_iter()
            .take(self.k)
            .filter(|&row| distances[row] <= self.dist_max)
            .filter_map(|row| {
                self.store.row(row).map(|r| Neighbor {
                    row,
                    category: r.category,
                    distance: distances[row],
                })
            })
            .collect();
        Ok(neighbors)
    }

    /// Classify a query feature vector.
    ///
    /// An empty store, `k == 0`, or no neighbor within `dist_max` all yield
    /// [`Classification::Unclassifiable`] rather than an error.
    ///
    /// # Errors
    ///
    /// Same as [`distances`](Self::distances).
    pub fn classify(&self, query: &[f64]) -> KnnResult<Classification> {
        let neighbors = self.neighbors(query)?;
        debug!(
            rows = self.store.len(),
            k = self.k,
            dist_max = self.dist_max,
            admitted = neighbors.len(),
            "knn candidates"
        );

        // category -> (votes, distance sum)
        let mut tally: BTreeMap<usize, (usize, f64)> = BTreeMap::new();
        for n in &neighbors {
            let entry = tally.entry(n.category).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += n.distance;
        }

        // Most votes, then smallest mean distance, then lowest category index
        let winner = tally
            .iter()
            .map(|(&category, &(votes, sum))| (category, votes, sum / votes as f64))
            .max_by(|a, b| {
                a.1.cmp(&b.1)
                    .then_with(|| b.2.total_cmp(&a.2))
                    .then_with(|| b.0.cmp(&a.0))
            });

        let Some((category, votes, mean_distance)) = winner else {
            debug!("query unclassifiable");
            return Ok(Classification::Unclassifiable {
                reason: NO_ADMISSIBLE_NEIGHBOR.to_string(),
            });
        };
        // Row categories are only ever produced by interning
        let label = self.store.categories().labels()[category].clone();

        debug!(%label, votes, mean_distance, "query classified");
        Ok(Classification::Classified {
            label,
            category,
            votes,
            mean_distance,
        })
    }
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KnnError;

    fn classifier(k: usize, dist_max: f64, nb: usize) -> KnnClassifier {
        KnnClassifier::new(&KnnOptions {
            k,
            dist_max,
            nb_determinant: nb,
        })
        .unwrap()
    }

    #[test]
    fn test_euclidean() {
        assert!((euclidean(&[0.0, 0.0], &[3.0, 4.0]) - 5.0).abs() < 1e-12);
        assert_eq!(euclidean(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_empty_store_is_unclassifiable() {
        let knn = classifier(3, 1.0, 3);
        let result = knn.classify(&[0.5, 0.5, 0.5]).unwrap();
        assert_eq!(
            result,
            Classification::Unclassifiable {
                reason: NO_ADMISSIBLE_NEIGHBOR.to_string()
            }
        );
        assert_eq!(result.label(), None);
    }

    #[test]
    fn test_zero_k_is_unclassifiable() {
        let mut knn = classifier(0, 10.0, 1);
        knn.add_point("a", &[0.0]).unwrap();
        assert!(!knn.classify(&[0.0]).unwrap().is_classified());
    }

    #[test]
    fn test_query_dimension_mismatch() {
        let mut knn = classifier(3, 1.0, 3);
        knn.add_point("a", &[0.1, 0.2, 0.3]).unwrap();
        assert_eq!(
            knn.classify(&[0.1, 0.2]),
            Err(KnnError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_k_larger_than_store_uses_all_rows() {
        let mut knn = classifier(7, 10.0, 1);
        for (label, x) in [("a", 0.0), ("a", 0.1), ("b", 0.2), ("b", 0.3), ("b", 0.4)] {
            knn.add_point(label, &[x]).unwrap();
        }
        let neighbors = knn.neighbors(&[0.0]).unwrap();
        assert_eq!(neighbors.len(), 5);
        // three b votes beat two a votes
        assert_eq!(knn.classify(&[0.0]).unwrap().label(), Some("b"));
    }

    #[test]
    fn test_distance_gate() {
        let mut knn = classifier(3, 0.3, 1);
        knn.add_point("near", &[0.1]).unwrap();
        knn.add_point("near", &[0.2]).unwrap();
        knn.add_point("far", &[0.5]).unwrap();

        let neighbors = knn.neighbors(&[0.0]).unwrap();
        let rows: Vec<usize> = neighbors.iter().map(|n| n.row).collect();
        assert_eq!(rows, vec![0, 1]);
    }

    #[test]
    fn test_gate_excludes_only_support() {
        // "far" would win by votes, but all its support is beyond dist_max
        let mut knn = classifier(3, 0.3, 1);
        knn.add_point("near", &[0.1]).unwrap();
        knn.add_point("far", &[0.5]).unwrap();
        knn.add_point("far", &[0.6]).unwrap();
        assert_eq!(knn.classify(&[0.0]).unwrap().label(), Some("near"));
    }

    #[test]
    fn test_tie_break_by_mean_distance() {
        let mut knn = classifier(4, 1.0, 1);
        knn.add_point("b", &[0.05]).unwrap();
        knn.add_point("a", &[0.1]).unwrap();
        knn.add_point("a", &[0.2]).unwrap();
        knn.add_point("b", &[0.3]).unwrap();

        // a: mean 0.15, b: mean 0.175
        match knn.classify(&[0.0]).unwrap() {
            Classification::Classified {
                label,
                votes,
                mean_distance,
                ..
            } => {
                assert_eq!(label, "a");
                assert_eq!(votes, 2);
                assert!((mean_distance - 0.15).abs() < 1e-12);
            }
            other => panic!("expected a classification, got {other:?}"),
        }
    }

    #[test]
    fn test_tie_on_mean_picks_lowest_category() {
        let mut knn = classifier(2, 1.0, 1);
        knn.add_point("right", &[0.5]).unwrap();
        knn.add_point("left", &[-0.5]).unwrap();
        let result = knn.classify(&[0.0]).unwrap();
        assert_eq!(result.label(), Some("right"));
    }

    #[test]
    fn test_winner_reports_its_own_category() {
        let mut knn = classifier(5, 1.0, 1);
        knn.add_point("a", &[0.4]).unwrap();
        knn.add_point("b", &[0.1]).unwrap();
        knn.add_point("c", &[0.2]).unwrap();
        knn.add_point("b", &[0.3]).unwrap();
        knn.add_point("c", &[0.25]).unwrap();

        // b and c both get two votes; b has the smaller mean (0.2 vs 0.225)
        match knn.classify(&[0.0]).unwrap() {
            Classification::Classified {
                label,
                category,
                votes,
                mean_distance,
            } => {
                assert_eq!(label, "b");
                assert_eq!(category, 1);
                assert_eq!(knn.store().categories().label(category), Some("b"));
                assert_eq!(votes, 2);
                assert!((mean_distance - 0.2).abs() < 1e-12);
            }
            other => panic!("expected a classification, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_does_not_mutate_store() {
        let mut knn = classifier(2, 1.0, 2);
        knn.add_point("a", &[0.1, 0.1]).unwrap();
        knn.add_point("b", &[0.9, 0.9]).unwrap();
        let before = knn.store().clone();
        let _ = knn.classify(&[0.2, 0.2]).unwrap();
        let _ = knn.classify(&[0.8, 0.8]).unwrap();
        let rows_before: Vec<_> = before.rows().collect();
        let rows_after: Vec<_> = knn.store().rows().collect();
        assert_eq!(rows_before, rows_after);
    }

    #[test]
    fn test_live_parameter_changes() {
        let mut knn = classifier(1, 0.05, 1);
        knn.add_point("a", &[0.1]).unwrap();
        assert!(!knn.classify(&[0.0]).unwrap().is_classified());

        knn.set_dist_max(0.2).unwrap();
        assert_eq!(knn.classify(&[0.0]).unwrap().label(), Some("a"));

        assert!(knn.set_dist_max(-1.0).is_err());
        assert_eq!(knn.dist_max(), 0.2);

        knn.set_k(0);
        assert!(!knn.classify(&[0.0]).unwrap().is_classified());
    }
}
