//! Shape descriptor extraction
//!
//! Turns a decoded binary image into the three-value feature vector used
//! for classification:
//!
//! 1. **Roundness**: `4 * pi * area / perimeter^2`, at most `pi / 4` since
//!    the perimeter is counted in pixel edges
//! 2. **Circle ratio**: `(min_radius / max_radius)^2`, the area of the
//!    inscribed circle over the area of the circumscribed circle, both
//!    centered on the centroid
//! 3. **Density**: `area / (pi * max_radius^2)`, clamped to 1.0 since a
//!    digitized shape can slightly overfill its enclosing circle

use std::f64::consts::PI;

use klustr_core::Raster;
use tracing::debug;

use crate::error::{ShapeError, ShapeResult};
use crate::metrics;

/// Number of features in a [`ShapeDescriptor`].
pub const DESCRIPTOR_LEN: usize = 3;

/// A labeled feature vector describing one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeDescriptor {
    /// Category label of the source image
    pub label: String,
    /// Circularity index, in `(0, pi / 4]`
    pub roundness: f64,
    /// Inscribed over circumscribed circle area
    pub circle_ratio: f64,
    /// Foreground area over circumscribed circle area
    pub density: f64,
}

impl ShapeDescriptor {
    /// The features in their fixed order: roundness, circle ratio, density.
    pub fn features(&self) -> [f64; DESCRIPTOR_LEN] {
        [self.roundness, self.circle_ratio, self.density]
    }

    /// Split into `(label, roundness, circle_ratio, density)`.
    pub fn into_parts(self) -> (String, f64, f64, f64) {
        (self.label, self.roundness, self.circle_ratio, self.density)
    }
}

/// Extract the descriptor of a decoded image.
///
/// Decoded images mark the shape with 0, so the raster is inverted once
/// before any measurement.
///
/// # Errors
///
/// Returns a degenerate-geometry [`ShapeError`] when the shape is empty,
/// has no outline, or collapses to a single point.
pub fn extract(label: &str, decoded: &Raster) -> ShapeResult<ShapeDescriptor> {
    describe(label, &decoded.inverted())
}

/// Compute the descriptor of a raster whose foreground is already 1.
///
/// # Errors
///
/// Same as [`extract`].
pub fn describe(label: &str, foreground: &Raster) -> ShapeResult<ShapeDescriptor> {
    let m = metrics::measure(foreground)?;
    if m.max_radius == 0.0 {
        return Err(ShapeError::ZeroRadius);
    }

    let area = m.area as f64;
    let roundness = roundness(area, m.perimeter);
    let circle_ratio = ((m.min_radius / m.max_radius).powi(2)).clamp(0.0, 1.0);
    let density = (area / (PI * m.max_radius * m.max_radius)).min(1.0);

    debug!(
        label,
        roundness, circle_ratio, density, "extracted shape descriptor"
    );

    Ok(ShapeDescriptor {
        label: label.to_string(),
        roundness,
        circle_ratio,
        density,
    })
}

/// Circularity index `4 * pi * area / perimeter^2`.
///
/// The perimeter counts pixel edges, which can never be fewer than
/// `4 * sqrt(area)`, so the index peaks at `pi / 4` for squares (a single
/// pixel included). A digitized disk of radius `r` has a perimeter of
/// `8r + 4` and its index tends to `pi^2 / 16` (about 0.617) as `r`
/// grows, not to 1.
fn roundness(area: f64, perimeter: u64) -> f64 {
    let p = perimeter as f64;
    4.0 * PI * area / (p * p)
}
