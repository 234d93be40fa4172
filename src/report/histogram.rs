//! Log-decade histogram binning.
//!
//! Outcomes are clamped into the display bounds first, which also keeps
//! zero wealth away from `log10`. Bin edges sit on every power of ten
//! covering the bounds; heights are the percentage of trials per bin.

use crate::config::ClampBounds;

use super::stats;

/// Binned view of one batch, ready for plotting.
#[derive(Debug, Clone)]
pub struct Histogram {
    /// Power-of-ten exponent of each edge, ascending.
    pub exponents: Vec<i32>,
    /// Edge values, `10^exponent`.
    pub edges: Vec<f64>,
    /// Percentage of trials in each bin; one fewer than `edges`.
    pub percentages: Vec<f64>,
    /// Mean of the clamped values.
    pub mean: f64,
    /// Median of the clamped values.
    pub median: f64,
}

impl Histogram {
    /// Tallest bin, in percent.
    pub fn peak(&self) -> f64 {
        self.percentages.iter().copied().fold(0.0, f64::max)
    }

    /// `1e-10`, `1e0`, `1e10`, … one per edge.
    pub fn tick_labels(&self) -> Vec<String> {
        self.exponents.iter().map(|e| format!("1e{e}")).collect()
    }
}

/// `10^exp`, correctly rounded for the exponents a clamp range can produce.
pub fn power_of_ten(exp: i32) -> f64 {
    if exp >= 0 {
        10f64.powi(exp)
    } else {
        1.0 / 10f64.powi(-exp)
    }
}

/// Exponents of every power-of-ten edge spanning the bounds.
pub fn decade_exponents(bounds: &ClampBounds) -> Vec<i32> {
    (bounds.min_exponent()..=bounds.max_exponent()).collect()
}

/// Clamp every value into the display bounds.
pub fn clamp_all(values: &[f64], bounds: &ClampBounds) -> Vec<f64> {
    values.iter().map(|v| bounds.clamp(*v)).collect()
}

/// Bin `values` into log decades after clamping.
pub fn build(values: &[f64], bounds: &ClampBounds) -> Histogram {
    let exponents = decade_exponents(bounds);
    let edges: Vec<f64> = exponents.iter().map(|e| power_of_ten(*e)).collect();
    let bins = edges.len().saturating_sub(1);

    let clamped = clamp_all(values, bounds);
    let mut counts = vec![0usize; bins];
    for v in &clamped {
        if let Some(idx) = bin_index(&edges, *v) {
            counts[idx] += 1;
        }
    }

    let total = clamped.len();
    let percentages = counts
        .iter()
        .map(|c| {
            if total == 0 {
                0.0
            } else {
                *c as f64 * 100.0 / total as f64
            }
        })
        .collect();

    Histogram {
        exponents,
        edges,
        percentages,
        mean: stats::mean(&clamped).unwrap_or(0.0),
        median: stats::median(&clamped).unwrap_or(0.0),
    }
}

/// Half-open bins `[e_i, e_{i+1})`; the last bin also takes its right edge.
fn bin_index(edges: &[f64], value: f64) -> Option<usize> {
    let bins = edges.len().checked_sub(1)?;
    if bins == 0 || value < edges[0] || value > edges[bins] {
        return None;
    }
    let upper = edges.partition_point(|e| *e <= value);
    Some((upper - 1).min(bins - 1))
}
