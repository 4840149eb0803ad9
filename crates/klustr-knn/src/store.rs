//! Labeled feature storage
//!
//! The store is an append-only matrix of `(category, feature...)` rows
//! plus the category dictionary that maps labels to row categories.
//! Rows are never removed or reordered, and a label keeps its index for
//! the lifetime of the store.

use std::collections::HashMap;

use crate::error::{KnnError, KnnResult};

/// Append-only mapping between category labels and indices
///
/// A label's index is its position in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct CategoryDictionary {
    labels: Vec<String>,
    lookup: HashMap<String, usize>,
}

impl CategoryDictionary {
    /// Create an empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the index of `label`, assigning the next free index the
    /// first time the label is seen.
    pub fn intern(&mut self, label: &str) -> usize {
        if let Some(&index) = self.lookup.get(label) {
            return index;
        }
        let index = self.labels.len();
        self.labels.push(label.to_string());
        self.lookup.insert(label.to_string(), index);
        index
    }

    /// Index of an already interned label
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.lookup.get(label).copied()
    }

    /// Label stored at `index`
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// All labels in index order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of distinct labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether no label has been interned yet
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// A borrowed view of one stored row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow<'a> {
    /// Category index into the store's [`CategoryDictionary`]
    pub category: usize,
    /// Feature values, `nb_determinant` long
    pub features: &'a [f64],
}

/// Growable labeled feature matrix
///
/// Features live in one flat buffer with a stride of `nb_determinant`,
/// with the category index of each row held in a parallel array.
#[derive(Debug, Clone)]
pub struct FeatureStore {
    nb_determinant: usize,
    categories: CategoryDictionary,
    row_categories: Vec<usize>,
    features: Vec<f64>,
}

impl FeatureStore {
    /// Create an empty store for `nb_determinant` features per row.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::InvalidParameter`] if `nb_determinant` is 0.
    pub fn new(nb_determinant: usize) -> KnnResult<Self> {
        if nb_determinant == 0 {
            return Err(KnnError::InvalidParameter(
                "nb_determinant must be positive".to_string(),
            ));
        }
        Ok(Self {
            nb_determinant,
            categories: CategoryDictionary::new(),
            row_categories: Vec::new(),
            features: Vec::new(),
        })
    }

    /// Number of features per row
    pub fn nb_determinant(&self) -> usize {
        self.nb_determinant
    }

    /// Number of stored rows
    pub fn len(&self) -> usize {
        self.row_categories.len()
    }

    /// Whether the store holds no rows
    pub fn is_empty(&self) -> bool {
        self.row_categories.is_empty()
    }

    /// The category dictionary
    pub fn categories(&self) -> &CategoryDictionary {
        &self.categories
    }

    /// Intern a category label.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::EmptyLabel`] for an empty label.
    pub fn intern_category(&mut self, label: &str) -> KnnResult<usize> {
        if label.is_empty() {
            return Err(KnnError::EmptyLabel);
        }
        Ok(self.categories.intern(label))
    }

    /// Append a labeled row and return its row index.
    ///
    /// The store is left untouched when validation fails.
    ///
    /// # Errors
    ///
    /// - [`KnnError::DimensionMismatch`] if `features.len() != nb_determinant`
    /// - [`KnnError::NonFiniteFeature`] if a feature is NaN or infinite
    /// - [`KnnError::EmptyLabel`] for an empty label
    pub fn append_row(&mut self, label: &str, features: &[f64]) -> KnnResult<usize> {
        validate_features(self.nb_determinant, features)?;
        let category = self.intern_category(label)?;
        self.row_categories.push(category);
        self.features.extend_from_slice(features);
        Ok(self.row_categories.len() - 1)
    }

    /// Row at `index`
    pub fn row(&self, index: usize) -> Option<FeatureRow<'_>> {
        let category = *self.row_categories.get(index)?;
        let start = index * self.nb_determinant;
        Some(FeatureRow {
            category,
            features: &self.features[start..start + self.nb_determinant],
        })
    }

    /// Iterate over all rows in insertion order
    pub fn rows(&self) -> impl Iterator<Item = FeatureRow<'_>> {
        self.row_categories
            .iter()
            .zip(self.features.chunks_exact(self.nb_determinant))
            .map(|(&category, features)| FeatureRow { category, features })
    }

    /// Number of rows per category, indexed by category
    pub fn category_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.categories.len()];
        for &category in &self.row_categories {
            counts[category] += 1;
        }
        counts
    }
}

/// Check that a feature vector has the expected length and finite values.
pub(crate) fn validate_features(expected: usize, features: &[f64]) -> KnnResult<()> {
    if features.len() != expected {
        return Err(KnnError::DimensionMismatch {
            expected,
            actual: features.len(),
        });
    }
    if let Some(index) = features.iter().position(|v| !v.is_finite()) {
        return Err(KnnError::NonFiniteFeature { index });
    }
    Ok(())
}
