//! KELLY-SIM — Monte Carlo sweep of repeated-betting wealth trajectories
//!
//! Entry point. Builds the compile-time configuration, initialises
//! structured logging, validates the configuration, and runs the sweep
//! for every configured flip count.

use anyhow::Result;
use tracing::info;

use kelly_sim::config::SimConfig;
use kelly_sim::driver::Driver;
use kelly_sim::report::FigureReporter;
use kelly_sim::storage;

const BANNER: &str = r#"
 _  _______ _     _  __   __     ____ ___ __  __
| |/ / ____| |   | | \ \ / /    / ___|_ _|  \/  |
| ' /|  _| | |   | |  \ V /____ \___ \| || |\/| |
| . \| |___| |___| |___| |_____| ___) | || |  | |
|_|\_\_____|_____|_____|_|      |____/___|_|  |_|

  Repeated-betting wealth trajectories
  v0.1.0
"#;

fn main() -> Result<()> {
    let cfg = SimConfig::default();

    init_logging();

    println!("{BANNER}");
    info!(
        experiments = cfg.num_experiments,
        initial_amount = cfg.initial_amount,
        win_rate = cfg.rates.win,
        lose_rate = cfg.rates.lose,
        workers = cfg.workers,
        results_dir = %storage::results_dir(&cfg).display(),
        "KELLY-SIM starting up"
    );

    let driver = Driver::new(&cfg, FigureReporter::new())?;
    let summary = driver.run()?;

    info!(
        figures = summary.figures.len(),
        elapsed_ms = summary.elapsed_ms,
        "KELLY-SIM finished"
    );

    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("kelly_sim=info"));

    let json_logging = std::env::var("KELLY_SIM_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
