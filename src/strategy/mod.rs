//! Strategy analysis — closed-form Kelly growth for the configured payoff
//! rates, compared against what the sweep actually produced.

pub mod kelly;

pub use kelly::{compare_growth, expected_log_growth, optimal_fraction, GrowthComparison};
