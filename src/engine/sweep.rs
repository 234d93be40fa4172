//! Sweep orchestrator.
//!
//! Fans one batch per bet fraction out over a `rayon` pool and gathers the
//! outcomes into a `ResultSet` in grid order. The pool is owned by a single
//! sweep: it is built on entry and dropped on every exit path, including
//! when a batch fails or a worker panics.

use chrono::Utc;
use rayon::prelude::*;
use tracing::{debug, info};

use super::batch::{run_batch, BatchSpec};
use crate::config::{SeedPolicy, SimConfig};
use crate::types::{Batch, ResultSet, SimError};

/// Run every configured bet fraction for `num_flips` flips.
///
/// Any failing batch aborts the whole sweep; partial results are dropped.
pub fn run_sweep(config: &SimConfig, num_flips: usize) -> Result<ResultSet, SimError> {
    let started = Utc::now();
    let specs = batch_specs(config, num_flips);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .thread_name(|i| format!("kelly-sweep-{i}"))
        .build()
        .map_err(|e| SimError::WorkerPool(e.to_string()))?;

    debug!(
        workers = pool.current_num_threads(),
        batches = specs.len(),
        "Worker pool ready"
    );

    let batches = pool.install(|| {
        specs
            .par_iter()
            .map(|spec| run_batch(spec).map(|outcomes| Batch::new(spec.fraction, outcomes)))
            .collect::<Result<Vec<_>, _>>()
    })?;

    info!(
        flips = num_flips,
        batches = batches.len(),
        trials_per_batch = config.num_experiments,
        elapsed_ms = (Utc::now() - started).num_milliseconds(),
        "Sweep complete"
    );

    Ok(ResultSet::new(num_flips, batches))
}

/// One `BatchSpec` per grid fraction, in grid order.
pub fn batch_specs(config: &SimConfig, num_flips: usize) -> Vec<BatchSpec> {
    config
        .grid
        .fractions()
        .into_iter()
        .enumerate()
        .map(|(index, fraction)| BatchSpec {
            fraction,
            num_experiments: config.num_experiments,
            num_flips,
            rates: config.rates,
            initial: config.initial_amount,
            seed: batch_seed(config.seed, num_flips, index),
        })
        .collect()
}

/// Seed for the batch at `index` of a sweep over `num_flips` flips.
///
/// Fixed seeds pass a distinct input through SplitMix64, which is a
/// bijection, so two batches of the same run never collide.
pub fn batch_seed(policy: SeedPolicy, num_flips: usize, index: usize) -> Option<u64> {
    match policy {
        SeedPolicy::Entropy => None,
        SeedPolicy::Fixed(base) => {
            let input = base
                .wrapping_add((num_flips as u64) << 32)
                .wrapping_add(index as u64);
            Some(splitmix64(input))
        }
    }
}

fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}
