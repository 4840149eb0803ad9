//! Synthetic shapes and feature clouds
//!
//! Rasters drawn here use the metric polarity (shape = 1). Pass them
//! through [`decoded`] to get what the image decoder would hand over.

use klustr_core::Raster;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::{TestError, TestResult};

/// Draw a filled disk of `radius` centered at `(cx, cy)`.
///
/// A pixel is set when its center lies within `radius` of `(cx, cy)`.
pub fn filled_disk(width: u32, height: u32, cx: f64, cy: f64, radius: f64) -> TestResult<Raster> {
    if radius < 0.0 {
        return Err(TestError::InvalidFixture(format!(
            "negative radius {radius}"
        )));
    }
    Ok(Raster::from_fn(width, height, |x, y| {
        (f64::from(x) - cx).hypot(f64::from(y) - cy) <= radius
    })?)
}

/// Draw a filled rectangle covering `x0..x1` and `y0..y1`.
///
/// The corners are clipped to the raster.
pub fn filled_rectangle(
    width: u32,
    height: u32,
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
) -> TestResult<Raster> {
    if x0 >= x1 || y0 >= y1 {
        return Err(TestError::InvalidFixture(format!(
            "empty rectangle ({x0}, {y0})-({x1}, {y1})"
        )));
    }
    let x1 = x1.min(width);
    let y1 = y1.min(height);
    Ok(Raster::from_fn(width, height, |x, y| {
        (x0..x1).contains(&x) && (y0..y1).contains(&y)
    })?)
}

/// Draw an annulus between `inner` and `outer` radius centered at `(cx, cy)`.
pub fn ring(
    width: u32,
    height: u32,
    cx: f64,
    cy: f64,
    inner: f64,
    outer: f64,
) -> TestResult<Raster> {
    if inner < 0.0 || inner >= outer {
        return Err(TestError::InvalidFixture(format!(
            "ring radii must satisfy 0 <= inner < outer, got {inner} and {outer}"
        )));
    }
    Ok(Raster::from_fn(width, height, |x, y| {
        let d = (f64::from(x) - cx).hypot(f64::from(y) - cy);
        d > inner && d <= outer
    })?)
}

/// The decoder's view of a shape: 0 marks the shape, 1 the background.
pub fn decoded(shape: &Raster) -> Raster {
    shape.inverted()
}

/// `count` feature vectors jittered uniformly within `spread` of `center`.
///
/// The same seed always yields the same cloud.
pub fn feature_cloud(center: &[f64], spread: f64, count: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let spread = spread.abs();
    (0..count)
        .map(|_| {
            center
                .iter()
                .map(|&c| c + rng.random_range(-spread..=spread))
                .collect()
        })
        .collect()
}

/// Deterministically shuffle a list.
pub fn shuffled<T>(mut items: Vec<T>, seed: u64) -> Vec<T> {
    let mut rng = StdRng::seed_from_u64(seed);
    items.shuffle(&mut rng);
    items
}
