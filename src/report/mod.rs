//! Reporting — console statistics and the histogram figure.
//!
//! The driver talks to a `Reporter`; `FigureReporter` is the production
//! implementation that prints to stdout and writes one PNG per sweep.

pub mod stats;
pub mod histogram;
pub mod figure;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::SimConfig;
use crate::storage;
use crate::strategy::kelly;
use crate::types::ResultSet;

/// Consumer of a finished sweep.
#[cfg_attr(test, mockall::automock)]
pub trait Reporter {
    /// Print the per-fraction statistics block.
    fn print_statistics(&self, results: &ResultSet, config: &SimConfig);

    /// Render the figure for this sweep and return where it was written.
    fn render(&self, results: &ResultSet, config: &SimConfig) -> Result<PathBuf>;
}

/// Prints statistics to stdout and writes PNG figures into the results
/// directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct FigureReporter;

impl FigureReporter {
    pub fn new() -> Self {
        Self
    }

    /// Text written to stdout for one sweep.
    pub fn console_text(&self, results: &ResultSet) -> String {
        stats::format_statistics(results)
    }
}

impl Reporter for FigureReporter {
    fn print_statistics(&self, results: &ResultSet, config: &SimConfig) {
        print!("{}", self.console_text(results));

        info!(
            flips = results.num_flips,
            optimal_fraction = kelly::optimal_fraction(config.rates),
            "Kelly-optimal fraction"
        );
        for cmp in kelly::compare_growth(results, config.rates, config.initial_amount) {
            info!(
                flips = results.num_flips,
                fraction = cmp.fraction,
                expected_growth = format!("{:.5}", cmp.expected),
                median_growth = format!("{:.5}", cmp.realised_median),
                "Per-flip log growth"
            );
        }
    }

    fn render(&self, results: &ResultSet, config: &SimConfig) -> Result<PathBuf> {
        let dir = storage::ensure_results_dir(config)?;
        let path = storage::figure_path(config, results.num_flips);

        figure::render(results, config, &path)
            .with_context(|| format!("Failed to render figure for {} flips", results.num_flips))?;

        info!(
            flips = results.num_flips,
            dir = %dir.display(),
            path = %path.display(),
            "Figure saved"
        );
        Ok(path)
    }
}
