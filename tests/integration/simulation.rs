//! End-to-end simulation checks.
//!
//! Drives the public engine API with small experiment counts and fixed
//! seeds, covering the recurrence scenarios and the sweep's shape.

use kelly_sim::config::{BetGrid, PayoffRates, SeedPolicy, SimConfig};
use kelly_sim::engine::{final_wealth, run_batch, run_sweep, BatchSpec};
use kelly_sim::strategy::optimal_fraction;
use kelly_sim::types::SimError;

fn small_config() -> SimConfig {
    SimConfig {
        num_experiments: 500,
        workers: 4,
        seed: SeedPolicy::Fixed(2024),
        ..SimConfig::default()
    }
}

#[test]
fn test_win_then_lose_scenario() {
    let rates = PayoffRates::default();
    // 1.0 → 0.5 + 0.5·1.25 = 1.125 → 0.5625 + 0.5625·0.8 = 1.0125
    let after_one = final_wealth(0.5, [true], rates, 1.0);
    assert_eq!(after_one, 1.125);
    let wealth = final_wealth(0.5, [true, false], rates, 1.0);
    assert!((wealth - 1.0125).abs() < 1e-12, "{wealth}");
}

#[test]
fn test_lose_then_win_scenario() {
    let rates = PayoffRates::default();
    // 1.0 → 0.5 + 0.4 = 0.9 → 0.45 + 0.45·1.25 = 1.0125
    let after_one = final_wealth(0.5, [false], rates, 1.0);
    assert!((after_one - 0.9).abs() < 1e-15);
    let wealth = final_wealth(0.5, [false, true], rates, 1.0);
    assert!((wealth - 1.0125).abs() < 1e-12, "{wealth}");
}

#[test]
fn test_flip_order_does_not_change_outcome() {
    // Each flip scales wealth by (1 − p + p·rate), so any permutation of the
    // same wins and losses multiplies the same factors.
    for rates in [PayoffRates { win: 1.25, lose: 0.8 }, PayoffRates { win: 1.5, lose: 0.8 }] {
        let a = final_wealth(0.5, [true, false], rates, 1.0);
        let b = final_wealth(0.5, [false, true], rates, 1.0);
        assert!((a - b).abs() < 1e-12, "{a} vs {b}");
    }
}

#[test]
fn test_default_sweep_shape() {
    let cfg = small_config();
    let results = run_sweep(&cfg, 100).unwrap();

    assert_eq!(results.num_flips, 100);
    assert_eq!(results.len(), 11);
    let expected: Vec<f64> = (0..=10).map(|i| i as f64 / 10.0).collect();
    for (got, want) in results.fractions().iter().zip(&expected) {
        assert!((got - want).abs() < 1e-12, "{got} vs {want}");
    }
    assert!(results.iter().all(|b| b.len() == 500));
}

#[test]
fn test_zero_fraction_never_moves() {
    let results = run_sweep(&small_config(), 300).unwrap();
    let zero = results.get(0.0).unwrap();
    assert!(zero.outcomes.iter().all(|v| *v == 1.0));
}

#[test]
fn test_full_fraction_with_zero_lose_rate_is_ruined() {
    let cfg = SimConfig {
        rates: PayoffRates { win: 1.25, lose: 0.0 },
        ..small_config()
    };
    let results = run_sweep(&cfg, 100).unwrap();
    let all_in = results.get(1.0).unwrap();
    // 2^-100 chance of a surviving trial; any survivor must be exactly win^n.
    let survivor = 1.25f64.powi(100);
    assert!(all_in
        .outcomes
        .iter()
        .all(|v| *v == 0.0 || (v - survivor).abs() <= survivor * 1e-9));
    assert!(all_in.outcomes.iter().filter(|v| **v == 0.0).count() >= 499);
}

#[test]
fn test_kelly_fraction_has_highest_median() {
    let cfg = SimConfig {
        num_experiments: 2_000,
        ..small_config()
    };
    let results = run_sweep(&cfg, 400).unwrap();
    let optimal = optimal_fraction(cfg.rates);
    assert!((optimal - 0.5).abs() < 1e-12);

    let median_at = |f: f64| {
        let mut v = results.get(f).unwrap().outcomes.clone();
        v.sort_by(f64::total_cmp);
        v[v.len() / 2]
    };
    // Half-Kelly region beats both extremes comfortably over 400 flips.
    assert!(median_at(0.5) > median_at(0.0));
    assert!(median_at(0.5) > median_at(1.0));
}

#[test]
fn test_fixed_seed_runs_replay() {
    let cfg = small_config();
    assert_eq!(run_sweep(&cfg, 50).unwrap(), run_sweep(&cfg, 50).unwrap());
}

#[test]
fn test_worker_failure_fails_whole_sweep() {
    let cfg = SimConfig {
        grid: BetGrid { start: 0.5, stop: 1.5, step: 0.5 },
        ..small_config()
    };
    assert!(cfg.validate().is_err());
    assert!(matches!(run_sweep(&cfg, 10), Err(SimError::InvalidFraction(_))));
}

#[test]
fn test_batch_runner_public_api() {
    let spec = BatchSpec {
        fraction: 0.25,
        num_experiments: 64,
        num_flips: 0,
        rates: PayoffRates::default(),
        initial: 1.0,
        seed: None,
    };
    let out = run_batch(&spec).unwrap();
    assert_eq!(out, vec![1.0; 64]);
}
