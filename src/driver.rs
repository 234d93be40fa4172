//! Driver — the outer loop over flip counts.
//!
//! Each flip count is an independent pipeline run: sweep, render, print.
//! Runs are strictly sequential and share nothing but the immutable config.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use crate::config::SimConfig;
use crate::engine::run_sweep;
use crate::report::Reporter;

/// What a complete run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// One figure per flip count, in sweep order.
    pub figures: Vec<PathBuf>,
    pub elapsed_ms: i64,
}

pub struct Driver<'a, R: Reporter> {
    config: &'a SimConfig,
    reporter: R,
}

impl<'a, R: Reporter> Driver<'a, R> {
    /// Validate the config up front; no simulation work happens on error.
    pub fn new(config: &'a SimConfig, reporter: R) -> Result<Self> {
        config.validate().context("Invalid simulation configuration")?;
        Ok(Self { config, reporter })
    }

    /// Run every configured flip count, stopping at the first failure.
    pub fn run(&self) -> Result<RunSummary> {
        let started = Utc::now();
        let flip_counts = self.config.flips.flip_counts();
        info!(
            flip_counts = ?flip_counts,
            fractions = self.config.grid.fractions().len(),
            experiments = self.config.num_experiments,
            workers = self.config.workers,
            "Starting sweep run"
        );

        let mut figures = Vec::with_capacity(flip_counts.len());
        for num_flips in flip_counts {
            figures.push(self.run_configuration(num_flips)?);
        }

        let elapsed_ms = (Utc::now() - started).num_milliseconds();
        info!(figures = figures.len(), elapsed_ms, "Run complete");
        Ok(RunSummary { figures, elapsed_ms })
    }

    /// Sweep one flip count, then render and print its results.
    pub fn run_configuration(&self, num_flips: usize) -> Result<PathBuf> {
        println!(
            "Running simulations for {num_flips} flips using {} CPU cores...",
            self.config.workers
        );

        let results = run_sweep(self.config, num_flips)
            .with_context(|| format!("Sweep failed for {num_flips} flips"))?;
        let path = self.reporter.render(&results, self.config)?;
        self.reporter.print_statistics(&results, self.config);

        Ok(path)
    }
}
