//! Measurement functions for binary rasters
//!
//! Stateless functions computing area, perimeter, centroid, boundary
//! pixels and centroid-to-boundary radii of the foreground (value 1).
//!
//! # Border handling
//!
//! Every function treats pixels outside the raster as background (zero
//! padding). Edges are neither wrapped around to the opposite side nor
//! skipped: a foreground pixel on the raster edge adds one transition
//! towards the padding. A shape touching the raster edge therefore has a
//! closed outline, and the perimeter and the boundary pixel set describe
//! the same outline: each counted transition borders exactly one boundary
//! pixel.

use crate::error::{ShapeError, ShapeResult};
use klustr_core::Raster;

/// The four edge-adjacent neighbor offsets as `(dx, dy)`.
const NEIGHBORS_4: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// All basic measurements of one shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeMetrics {
    /// Number of foreground pixels
    pub area: u64,
    /// Number of foreground/background transitions
    pub perimeter: u64,
    /// Foreground-weighted mean position as `(row, col)`
    pub centroid: (f64, f64),
    /// Smallest centroid-to-boundary distance
    pub min_radius: f64,
    /// Largest centroid-to-boundary distance
    pub max_radius: f64,
}

/// Count the foreground pixels.
pub fn area(raster: &Raster) -> u64 {
    raster.count_ones()
}

/// Count foreground/background transitions between 4-adjacent pixels.
///
/// Every horizontally or vertically adjacent pair whose values differ adds
/// one, including the pairs formed with the zero padding around the
/// raster. The result is the length of the shape's outline in pixel edges.
pub fn perimeter(raster: &Raster) -> u64 {
    let w = i64::from(raster.width());
    let h = i64::from(raster.height());
    let mut count = 0u64;

    // Horizontal pairs (x, x + 1), including both padded ends
    for y in 0..h {
        for x in -1..w {
            if raster.get_pixel_padded(x, y) != raster.get_pixel_padded(x + 1, y) {
                count += 1;
            }
        }
    }

    // Vertical pairs (y, y + 1)
    for x in 0..w {
        for y in -1..h {
            if raster.get_pixel_padded(x, y) != raster.get_pixel_padded(x, y + 1) {
                count += 1;
            }
        }
    }

    count
}

/// Compute the foreground centroid as `(row, col)`.
///
/// # Errors
///
/// Returns [`ShapeError::ZeroArea`] if the raster has no foreground.
pub fn centroid(raster: &Raster) -> ShapeResult<(f64, f64)> {
    let mut sum_row = 0.0f64;
    let mut sum_col = 0.0f64;
    let mut count = 0u64;

    for (y, row) in raster.rows().enumerate() {
        for (x, &val) in row.iter().enumerate() {
            if val != 0 {
                sum_row += y as f64;
                sum_col += x as f64;
                count += 1;
            }
        }
    }

    if count == 0 {
        return Err(ShapeError::ZeroArea);
    }
    let n = count as f64;
    Ok((sum_row / n, sum_col / n))
}

/// Whether the foreground pixel at (x, y) touches the background.
#[inline]
fn is_boundary(raster: &Raster, x: i64, y: i64) -> bool {
    raster.get_pixel_padded(x, y) != 0
        && NEIGHBORS_4
            .iter()
            .any(|&(dx, dy)| raster.get_pixel_padded(x + dx, y + dy) == 0)
}

/// Extract the boundary pixels of the foreground.
///
/// A boundary pixel is a foreground pixel with at least one background
/// 4-neighbor; out-of-bounds neighbors count as background.
pub fn boundary_mask(raster: &Raster) -> ShapeResult<Raster> {
    let mut mask = Raster::new(raster.width(), raster.height())?.to_mut();
    for y in 0..raster.height() {
        for x in 0..raster.width() {
            if is_boundary(raster, i64::from(x), i64::from(y)) {
                mask.set_pixel_unchecked(x, y, 1);
            }
        }
    }
    Ok(mask.into())
}

/// Compute the minimum and maximum Euclidean distance from `center`
/// (given as `(row, col)`) to the boundary pixels.
///
/// # Errors
///
/// Returns [`ShapeError::NoBoundary`] if the raster has no boundary pixel.
pub fn boundary_radii(raster: &Raster, center: (f64, f64)) -> ShapeResult<(f64, f64)> {
    let (crow, ccol) = center;
    let mut min_d = f64::INFINITY;
    let mut max_d = f64::NEG_INFINITY;
    let mut found = false;

    for y in 0..i64::from(raster.height()) {
        for x in 0..i64::from(raster.width()) {
            if !is_boundary(raster, x, y) {
                continue;
            }
            let d = (y as f64 - crow).hypot(x as f64 - ccol);
            min_d = min_d.min(d);
            max_d = max_d.max(d);
            found = true;
        }
    }

    if !found {
        return Err(ShapeError::NoBoundary);
    }
    Ok((min_d, max_d))
}

/// Compute every basic measurement in one call.
///
/// # Errors
///
/// Returns [`ShapeError::ZeroPerimeter`] for a raster without foreground.
/// Any foreground pixel borders the zero padding or a background pixel,
/// so a non-zero perimeter also guarantees a centroid and a boundary.
pub fn measure(raster: &Raster) -> ShapeResult<ShapeMetrics> {
    let perimeter = perimeter(raster);
    if perimeter == 0 {
        return Err(ShapeError::ZeroPerimeter);
    }
    let center = centroid(raster)?;
    let (min_radius, max_radius) = boundary_radii(raster, center)?;
    Ok(ShapeMetrics {
        area: area(raster),
        perimeter,
        centroid: center,
        min_radius,
        max_radius,
    })
}
