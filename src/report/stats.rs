//! Summary statistics for a batch of trial outcomes.
//!
//! Statistics are computed on the raw outcomes. The histogram panels clamp
//! before summarising, so the two can disagree for batches with values
//! outside the display bounds.

use crate::types::ResultSet;

/// Mean, median, min and max of one batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

/// Summarise a slice of outcomes. `None` for an empty slice.
pub fn summarize(values: &[f64]) -> Option<Summary> {
    if values.is_empty() {
        return None;
    }
    let mean = mean(values)?;
    let median = median(values)?;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some(Summary { mean, median, min, max })
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median; the average of the two middle values for even lengths.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Scientific notation with two mantissa decimals and a signed exponent of
/// at least two digits: `1.01e+00`, `3.55e+48`, `4.07e-20`.
pub fn sci(value: f64) -> String {
    if value.is_nan() {
        return "nan".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf".into() } else { "-inf".into() };
    }

    let raw = format!("{value:.2e}");
    let Some((mantissa, exponent)) = raw.split_once('e') else {
        return raw;
    };
    let exp: i32 = exponent.parse().unwrap_or(0);
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.abs())
}

/// The console statistics block for one sweep.
pub fn format_statistics(results: &ResultSet) -> String {
    let mut out = format!("\nStatistics for {} flips:\n", results.num_flips);
    for batch in results {
        out.push_str(&format!("\n{}:\n", batch.label()));
        match summarize(&batch.outcomes) {
            Some(s) => {
                out.push_str(&format!("Average final amount: {}\n", sci(s.mean)));
                out.push_str(&format!("Median final amount: {}\n", sci(s.median)));
                out.push_str(&format!("Minimum final amount: {}\n", sci(s.min)));
                out.push_str(&format!("Maximum final amount: {}\n", sci(s.max)));
            }
            None => out.push_str("No trials recorded\n"),
        }
    }
    out
}
