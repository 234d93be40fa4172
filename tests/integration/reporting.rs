//! Reporter checks against real sweep output.

use std::path::PathBuf;

use kelly_sim::config::{SeedPolicy, SimConfig};
use kelly_sim::engine::run_sweep;
use kelly_sim::report::histogram;
use kelly_sim::report::stats::{format_statistics, sci, summarize};
use kelly_sim::report::{FigureReporter, Reporter};
use kelly_sim::storage;

fn temp_config() -> SimConfig {
    let mut cfg = SimConfig {
        num_experiments: 300,
        workers: 2,
        seed: SeedPolicy::Fixed(77),
        output_root: std::env::temp_dir().join(format!("kelly_sim_it_{}", uuid::Uuid::new_v4())),
        ..SimConfig::default()
    };
    cfg.figure.dpi = 12;
    cfg
}

#[test]
fn test_statistics_block_covers_every_fraction() {
    let cfg = temp_config();
    let results = run_sweep(&cfg, 100).unwrap();
    let text = format_statistics(&results);

    assert!(text.contains("Statistics for 100 flips:"));
    for pct in (0..=100).step_by(10) {
        assert!(text.contains(&format!("Betting {pct}% of Amount:")), "missing {pct}%");
    }
    assert_eq!(text.matches("Average final amount:").count(), 11);
    assert_eq!(text.matches("Maximum final amount:").count(), 11);
    // The 0% batch never moves.
    assert!(text.contains("Betting 0% of Amount:\nAverage final amount: 1.00e+00\n"));
}

#[test]
fn test_raw_statistics_vs_clamped_histogram() {
    let cfg = temp_config();
    let results = run_sweep(&cfg, 400).unwrap();

    for batch in &results {
        let raw = summarize(&batch.outcomes).unwrap();
        let hist = histogram::build(&batch.outcomes, &cfg.clamp);

        let total: f64 = hist.percentages.iter().sum();
        assert!((total - 100.0).abs() < 1e-9, "{}: {total}", batch.label());
        assert!(hist.mean >= cfg.clamp.min && hist.mean <= cfg.clamp.max);
        if raw.max <= cfg.clamp.max && raw.min >= cfg.clamp.min {
            assert!((hist.mean - raw.mean).abs() <= raw.mean.abs() * 1e-12);
        }
    }
}

#[test]
fn test_sci_matches_console_format() {
    assert_eq!(sci(1.0125), "1.01e+00");
    assert_eq!(sci(9.313225746154785e-10), "9.31e-10");
}

#[test]
fn test_results_location() {
    let cfg = temp_config();
    let path = storage::figure_path(&cfg, 200);
    assert_eq!(path.file_name().unwrap(), "percentage_200.png");
    assert_eq!(
        path.parent().unwrap().file_name().unwrap(),
        "results_1.25_0.8"
    );
    assert!(path.starts_with(&cfg.output_root));
}

#[test]
#[ignore = "needs a system sans-serif font"]
fn test_figure_reporter_writes_png() {
    let cfg = temp_config();
    let results = run_sweep(&cfg, 100).unwrap();

    let path = FigureReporter::new().render(&results, &cfg).unwrap();
    assert_eq!(path, storage::figure_path(&cfg, 100));
    assert!(path.is_file());

    // Re-rendering into the existing directory is fine.
    let again: PathBuf = FigureReporter::new().render(&results, &cfg).unwrap();
    assert_eq!(again, path);

    std::fs::remove_dir_all(&cfg.output_root).unwrap();
}
