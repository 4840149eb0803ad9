//! Training data snapshots for plotting
//!
//! A scatter plot of the training set draws one series per category, each
//! in its own color. [`FeatureStore::series`] groups the rows, and
//! [`ColorSequence`] hands out well separated colors one category at a
//! time.

use crate::store::FeatureStore;

/// The rows of one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySeries<'a> {
    /// Category index
    pub category: usize,
    /// Category label
    pub label: &'a str,
    /// Feature vectors of every row in the category, in insertion order
    pub points: Vec<&'a [f64]>,
}

impl FeatureStore {
    /// Group the stored rows by category, in category index order.
    pub fn series(&self) -> Vec<CategorySeries<'_>> {
        let mut series: Vec<CategorySeries<'_>> = self
            .categories()
            .labels()
            .iter()
            .enumerate()
            .map(|(category, label)| CategorySeries {
                category,
                label: label.as_str(),
                points: Vec::new(),
            })
            .collect();
        for row in self.rows() {
            series[row.category].points.push(row.features);
        }
        series
    }
}

/// Generator of distinct colors
///
/// Hues are spread by repeated halving of the hue circle: the first color
/// sits at 0.5, then 0.25 and 0.75, then the four eighths in between, and
/// so on, so that consecutive colors stay far apart.
#[derive(Debug, Clone)]
pub struct ColorSequence {
    count: u32,
    saturation: f64,
    lightness: f64,
}

impl Default for ColorSequence {
    fn default() -> Self {
        Self {
            count: 0,
            saturation: 1.0,
            lightness: 0.5,
        }
    }
}

impl ColorSequence {
    /// Create a sequence with full saturation and medium lightness
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HSL saturation, clamped to `[0, 1]`
    pub fn with_saturation(mut self, saturation: f64) -> Self {
        self.saturation = saturation.clamp(0.0, 1.0);
        self
    }

    /// Set the HSL lightness, clamped to `[0, 1]`
    pub fn with_lightness(mut self, lightness: f64) -> Self {
        self.lightness = lightness.clamp(0.0, 1.0);
        self
    }

    /// Number of colors handed out so far
    pub fn generated(&self) -> u32 {
        self.count
    }

    /// Advance and return the next hue in `[0, 1)`
    pub fn next_hue(&mut self) -> f64 {
        self.count += 1;
        let n = self.count;
        let size = 1u32 << (31 - n.leading_zeros());
        let index = n - size;
        (f64::from(index) + 0.5) / f64::from(size)
    }

    /// Advance and return the next color as RGB
    pub fn next_rgb(&mut self) -> (u8, u8, u8) {
        let hue = self.next_hue();
        hsl_to_rgb(hue, self.saturation, self.lightness)
    }
}

impl Iterator for ColorSequence {
    type Item = (u8, u8, u8);

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_rgb())
    }
}

/// Convert HSL (each in `[0, 1]`) to 8-bit RGB.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = (h.rem_euclid(1.0)) * 6.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let to_u8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_u8(r1), to_u8(g1), to_u8(b1))
}
