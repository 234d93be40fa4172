//! Output location.
//!
//! Figures land in `<output_root>/results_<win>_<lose>/percentage_<flips>.png`.
//! The directory is created on demand and creation is idempotent; nothing
//! else is written to disk.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::debug;

use crate::config::{SimConfig, FIGURE_FILE_PREFIX, RESULTS_DIR_PREFIX};

/// Results directory name for the configured rates, e.g. `results_1.25_0.8`.
pub fn results_dir_name(config: &SimConfig) -> String {
    format!(
        "{RESULTS_DIR_PREFIX}_{}_{}",
        config.rates.win, config.rates.lose
    )
}

/// Full path of the results directory.
pub fn results_dir(config: &SimConfig) -> PathBuf {
    config.output_root.join(results_dir_name(config))
}

/// Path of the figure for one flip count.
pub fn figure_path(config: &SimConfig, num_flips: usize) -> PathBuf {
    results_dir(config).join(format!("{FIGURE_FILE_PREFIX}_{num_flips}.png"))
}

/// Create the results directory if it does not exist yet.
pub fn ensure_results_dir(config: &SimConfig) -> Result<PathBuf> {
    let dir = results_dir(config);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create results directory {}", dir.display()))?;
    debug!(dir = %dir.display(), "Results directory ready");
    Ok(dir)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
