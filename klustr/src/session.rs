//! Training-set ingestion and raster classification
//!
//! A [`ShapeSession`] ties descriptor extraction to the classifier: every
//! decoded image is turned into a descriptor and either stored as a
//! training point or classified as a query.

use std::borrow::Borrow;

use klustr_core::Raster;
use klustr_knn::{Classification, KnnClassifier, KnnError, KnnOptions};
use klustr_shape::{DESCRIPTOR_LEN, ShapeDescriptor, ShapeError, extract};
use thiserror::Error;
use tracing::{info, warn};

/// Errors from session operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum KlustrError {
    /// The image could not be described
    #[error("shape error: {0}")]
    Shape(#[from] ShapeError),

    /// The classifier rejected the input
    #[error("classifier error: {0}")]
    Knn(#[from] KnnError),
}

impl KlustrError {
    /// Whether the failure comes from the image rather than from the
    /// caller's parameters.
    pub fn is_bad_image(&self) -> bool {
        matches!(self, KlustrError::Shape(_))
    }
}

/// Result type for session operations
pub type KlustrResult<T> = Result<T, KlustrError>;

/// An image that could not be added to the training set
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedImage {
    /// Position of the image in the ingested sequence
    pub position: usize,
    /// Label the image was submitted with
    pub label: String,
    /// Why it was rejected
    pub error: KlustrError,
}

/// Outcome of a bulk ingestion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    /// Number of images stored as training points
    pub accepted: usize,
    /// Images skipped, in submission order
    pub rejected: Vec<RejectedImage>,
}

/// Shape classification session
#[derive(Debug, Clone)]
pub struct ShapeSession {
    classifier: KnnClassifier,
}

impl ShapeSession {
    /// Create a session with an empty training set.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::InvalidParameter`] if the options do not
    /// validate or do not expect one feature per shape descriptor value.
    pub fn new(options: &KnnOptions) -> KlustrResult<Self> {
        if options.nb_determinant != DESCRIPTOR_LEN {
            return Err(KnnError::InvalidParameter(format!(
                "shape descriptors have {DESCRIPTOR_LEN} features, options expect {}",
                options.nb_determinant
            ))
            .into());
        }
        Ok(Self {
            classifier: KnnClassifier::new(options)?,
        })
    }

    /// The underlying classifier
    pub fn classifier(&self) -> &KnnClassifier {
        &self.classifier
    }

    /// Mutable access to the classifier, for live `k` / `dist_max` changes
    pub fn classifier_mut(&mut self) -> &mut KnnClassifier {
        &mut self.classifier
    }

    /// Describe a decoded image and store it as a training point.
    ///
    /// # Errors
    ///
    /// A degenerate image yields [`KlustrError::Shape`] and leaves the
    /// training set unchanged.
    pub fn ingest(&mut self, label: &str, decoded: &Raster) -> KlustrResult<ShapeDescriptor> {
        let descriptor = extract(label, decoded)?;
        self.classifier.add_point(label, &descriptor.features())?;
        Ok(descriptor)
    }

    /// Ingest a sequence of `(label, decoded image)` pairs.
    ///
    /// Images that fail are skipped and reported; they never abort the
    /// remaining ingestion.
    pub fn ingest_all<I, L, R>(&mut self, images: I) -> IngestReport
    where
        I: IntoIterator<Item = (L, R)>,
        L: AsRef<str>,
        R: Borrow<Raster>,
    {
        let mut report = IngestReport::default();
        for (position, (label, raster)) in images.into_iter().enumerate() {
            let label = label.as_ref();
            match self.ingest(label, raster.borrow()) {
                Ok(_) => report.accepted += 1,
                Err(error) => {
                    warn!(position, label, %error, "rejected training image");
                    report.rejected.push(RejectedImage {
                        position,
                        label: label.to_string(),
                        error,
                    });
                }
            }
        }
        info!(
            accepted = report.accepted,
            rejected = report.rejected.len(),
            categories = self.classifier.store().categories().len(),
            "training set ingested"
        );
        report
    }

    /// Describe a decoded image and classify it.
    ///
    /// # Errors
    ///
    /// [`KlustrError::Shape`] when the image is degenerate. A query with no
    /// admissible neighbor is not an error but
    /// [`Classification::Unclassifiable`].
    pub fn classify_raster(&self, decoded: &Raster) -> KlustrResult<Classification> {
        let descriptor = extract("query", decoded)?;
        Ok(self.classifier.classify(&descriptor.features())?)
    }
}
