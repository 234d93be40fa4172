//! Kelly criterion growth analysis.
//!
//! For a fair coin where the wagered fraction `p` of wealth is scaled by
//! `win` or `lose`, wealth after one flip is `1 + p·a` or `1 + p·b` with
//! `a = win − 1` and `b = lose − 1`. The expected log growth per flip is
//!
//!   g(p) = ½·ln(1 + p·a) + ½·ln(1 + p·b)
//!
//! and its maximiser, the Kelly fraction, solves `a + b + 2·p·a·b = 0`.

use tracing::debug;

use crate::config::PayoffRates;
use crate::engine::trial::FAIR_COIN;
use crate::types::ResultSet;

// ---------------------------------------------------------------------------
// Closed-form growth
// ---------------------------------------------------------------------------

/// Expected log growth per flip when betting `fraction` of wealth.
///
/// Returns `-inf` when a loss would wipe out all wealth.
pub fn expected_log_growth(fraction: f64, rates: PayoffRates) -> f64 {
    let win_factor = 1.0 - fraction + fraction * rates.win;
    let lose_factor = 1.0 - fraction + fraction * rates.lose;
    FAIR_COIN * win_factor.ln() + (1.0 - FAIR_COIN) * lose_factor.ln()
}

/// Growth-optimal bet fraction, clamped into `[0, 1]`.
pub fn optimal_fraction(rates: PayoffRates) -> f64 {
    let a = rates.win - 1.0;
    let b = rates.lose - 1.0;

    // Both outcomes gain: bet everything. Both lose (or break even): bet nothing.
    if a >= 0.0 && b >= 0.0 {
        return if a + b > 0.0 { 1.0 } else { 0.0 };
    }
    if a <= 0.0 && b <= 0.0 {
        return 0.0;
    }

    (-(a + b) / (2.0 * a * b)).clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Sweep comparison
// ---------------------------------------------------------------------------

/// Expected vs. realised growth for one bet fraction.
#[derive(Debug, Clone)]
pub struct GrowthComparison {
    pub fraction: f64,
    /// Closed-form expected log growth per flip.
    pub expected: f64,
    /// Per-flip log growth of the median trial outcome.
    pub realised_median: f64,
}

/// Compare each batch's median outcome with the closed-form growth rate.
///
/// The median of a batch tracks `initial · exp(n · g(p))`, so the realised
/// per-flip growth is `ln(median / initial) / n`.
pub fn compare_growth(
    results: &ResultSet,
    rates: PayoffRates,
    initial: f64,
) -> Vec<GrowthComparison> {
    let n = results.num_flips.max(1) as f64;
    results
        .iter()
        .map(|batch| {
            let median = crate::report::stats::median(&batch.outcomes).unwrap_or(initial);
            let realised_median = (median / initial).ln() / n;
            let expected = expected_log_growth(batch.fraction, rates);
            debug!(
                fraction = batch.fraction,
                expected = format!("{expected:.5}"),
                realised = format!("{realised_median:.5}"),
                "Growth comparison"
            );
            GrowthComparison {
                fraction: batch.fraction,
                expected,
                realised_median,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
