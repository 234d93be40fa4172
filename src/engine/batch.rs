//! Batch runner.
//!
//! Repeats the trial generator for one bet fraction. Every invocation owns
//! a freshly seeded `ChaCha8Rng`, so batches running side by side on the
//! worker pool never share or correlate their random streams.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::trial::run_trial;
use crate::config::PayoffRates;
use crate::types::SimError;

/// Parameters for one batch.
#[derive(Debug, Clone, Copy)]
pub struct BatchSpec {
    pub fraction: f64,
    pub num_experiments: usize,
    pub num_flips: usize,
    pub rates: PayoffRates,
    pub initial: f64,
    /// `None` draws the seed from OS entropy.
    pub seed: Option<u64>,
}

/// Run `num_experiments` independent trials for a single fraction.
pub fn run_batch(spec: &BatchSpec) -> Result<Vec<f64>, SimError> {
    if !spec.fraction.is_finite() || !(0.0..=1.0).contains(&spec.fraction) {
        return Err(SimError::InvalidFraction(spec.fraction));
    }

    let mut rng = match spec.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let outcomes: Vec<f64> = (0..spec.num_experiments)
        .map(|_| run_trial(spec.fraction, spec.num_flips, spec.rates, spec.initial, &mut rng))
        .collect();

    debug!(
        fraction = spec.fraction,
        trials = outcomes.len(),
        flips = spec.num_flips,
        seeded = spec.seed.is_some(),
        "Batch complete"
    );

    Ok(outcomes)
}
