//! Simulation configuration.
//!
//! Every parameter is a compile-time constant gathered into an immutable
//! `SimConfig`. The config is built once in `main`, validated before any
//! simulation work starts, and then passed by reference into the sweep and
//! the reporter. Nothing reads these constants from ambient scope.

use std::path::PathBuf;

use crate::types::SimError;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Trials per bet fraction.
pub const NUM_EXPERIMENTS: usize = 100_000;
/// Starting wealth of every trial.
pub const INITIAL_AMOUNT: f64 = 1.0;
/// Display clamp upper bound.
pub const MAX_AMOUNT: f64 = 1e10;
/// Display clamp lower bound.
pub const MIN_AMOUNT: f64 = 1e-10;

/// Bet fraction grid, inclusive on both ends.
pub const BET_FRACTION_START: f64 = 0.0;
pub const BET_FRACTION_STOP: f64 = 1.0;
pub const BET_FRACTION_STEP: f64 = 0.1;
/// Upper bound on bet fractions per sweep.
pub const MAX_GRID_POINTS: usize = 10_000;

/// Multiplier applied to the wagered amount on a winning flip.
pub const WIN_RATE: f64 = 1.25;
/// Multiplier applied to the wagered amount on a losing flip.
pub const LOSE_RATE: f64 = 0.8;

/// Flip-count sweep, `start..stop` by `step` (stop exclusive).
pub const FLIPS_START: usize = 100;
pub const FLIPS_STOP: usize = 500;
pub const FLIPS_STEP: usize = 100;

/// Figure canvas (16:9) and resolution.
pub const FIGURE_WIDTH_INCHES: u32 = 32;
pub const FIGURE_HEIGHT_INCHES: u32 = 18;
pub const FIGURE_DPI: u32 = 300;
pub const FIGURE_ROWS: usize = 3;
pub const FIGURE_COLS: usize = 4;

/// File name prefix for rendered figures: `percentage_<flips>.png`.
pub const FIGURE_FILE_PREFIX: &str = "percentage";
/// Directory name prefix for results: `results_<win>_<lose>`.
pub const RESULTS_DIR_PREFIX: &str = "results";

// ---------------------------------------------------------------------------
// Configuration types
// ---------------------------------------------------------------------------

/// Top-level simulation configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub num_experiments: usize,
    pub initial_amount: f64,
    pub clamp: ClampBounds,
    pub grid: BetGrid,
    pub rates: PayoffRates,
    pub flips: FlipSweep,
    /// Worker threads per sweep.
    pub workers: usize,
    pub seed: SeedPolicy,
    pub figure: FigureConfig,
    /// Directory under which `results_<win>_<lose>` is created.
    pub output_root: PathBuf,
}

/// Display-only clamp bounds for histogram binning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampBounds {
    pub min: f64,
    pub max: f64,
}

/// Inclusive bet fraction grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetGrid {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

/// Payoff multipliers for the wagered amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayoffRates {
    pub win: f64,
    pub lose: f64,
}

/// Flip-count sweep with an exclusive upper end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipSweep {
    pub start: usize,
    pub stop: usize,
    pub step: usize,
}

/// How each batch seeds its random source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedPolicy {
    /// Fresh OS entropy for every batch.
    Entropy,
    /// Deterministic per-batch seeds derived from a base value.
    Fixed(u64),
}

/// Figure layout and resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureConfig {
    pub width_inches: u32,
    pub height_inches: u32,
    pub dpi: u32,
    pub rows: usize,
    pub cols: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_experiments: NUM_EXPERIMENTS,
            initial_amount: INITIAL_AMOUNT,
            clamp: ClampBounds::default(),
            grid: BetGrid::default(),
            rates: PayoffRates::default(),
            flips: FlipSweep::default(),
            workers: available_workers(),
            seed: SeedPolicy::Entropy,
            figure: FigureConfig::default(),
            output_root: PathBuf::from("."),
        }
    }
}

impl Default for ClampBounds {
    fn default() -> Self {
        Self { min: MIN_AMOUNT, max: MAX_AMOUNT }
    }
}

impl Default for BetGrid {
    fn default() -> Self {
        Self {
            start: BET_FRACTION_START,
            stop: BET_FRACTION_STOP,
            step: BET_FRACTION_STEP,
        }
    }
}

impl Default for PayoffRates {
    fn default() -> Self {
        Self { win: WIN_RATE, lose: LOSE_RATE }
    }
}

impl Default for FlipSweep {
    fn default() -> Self {
        Self {
            start: FLIPS_START,
            stop: FLIPS_STOP,
            step: FLIPS_STEP,
        }
    }
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width_inches: FIGURE_WIDTH_INCHES,
            height_inches: FIGURE_HEIGHT_INCHES,
            dpi: FIGURE_DPI,
            rows: FIGURE_ROWS,
            cols: FIGURE_COLS,
        }
    }
}

/// Worker count matching the machine's available parallelism.
pub fn available_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

// ---------------------------------------------------------------------------
// Derived values
// ---------------------------------------------------------------------------

impl BetGrid {
    /// Every fraction on the grid, start and stop included.
    ///
    /// Values are rounded to 10 decimal places so accumulated step error
    /// never pushes the last point past `stop`.
    pub fn fractions(&self) -> Vec<f64> {
        let Some(count) = self.point_count() else {
            return Vec::new();
        };
        (0..count)
            .map(|i| {
                let raw = self.start + self.step * i as f64;
                (raw * 1e10).round() / 1e10
            })
            .collect()
    }

    /// Number of grid points, or `None` when the grid is empty, not finite,
    /// or larger than [`MAX_GRID_POINTS`].
    pub fn point_count(&self) -> Option<usize> {
        if !self.start.is_finite() || !self.stop.is_finite() || !self.step.is_finite() {
            return None;
        }
        if self.step <= 0.0 || self.stop < self.start {
            return None;
        }
        let steps = ((self.stop - self.start) / self.step + 1e-9).floor();
        if !steps.is_finite() || steps >= MAX_GRID_POINTS as f64 {
            return None;
        }
        (steps as usize).checked_add(1)
    }
}

impl FlipSweep {
    /// Flip counts in sweep order.
    pub fn flip_counts(&self) -> Vec<usize> {
        if self.step == 0 {
            return Vec::new();
        }
        (self.start..self.stop).step_by(self.step).collect()
    }
}

impl ClampBounds {
    /// Clamp a value into `[min, max]` for display.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    /// Lowest power-of-ten exponent covering `min`.
    pub fn min_exponent(&self) -> i32 {
        self.min.log10().floor() as i32
    }

    /// Highest power-of-ten exponent covering `max`.
    pub fn max_exponent(&self) -> i32 {
        self.max.log10().ceil() as i32
    }
}

impl FigureConfig {
    /// Canvas size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width_inches * self.dpi, self.height_inches * self.dpi)
    }

    /// Scale a point size (1/72 inch) to pixels at this DPI.
    pub fn points(&self, pt: f64) -> f64 {
        pt * self.dpi as f64 / 72.0
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

impl SimConfig {
    /// Reject configurations that would make the sweep meaningless.
    ///
    /// Called before any simulation work begins.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.num_experiments == 0 {
            return Err(SimError::Config("num_experiments must be positive".into()));
        }
        if !self.initial_amount.is_finite() || self.initial_amount <= 0.0 {
            return Err(SimError::Config(format!(
                "initial_amount must be finite and positive, got {}",
                self.initial_amount
            )));
        }

        let ClampBounds { min, max } = self.clamp;
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min >= max {
            return Err(SimError::Config(format!(
                "clamp bounds must satisfy 0 < min < max, got [{min}, {max}]"
            )));
        }

        if !self.grid.step.is_finite() || self.grid.step <= 0.0 {
            return Err(SimError::Config(format!(
                "bet fraction step must be positive, got {}",
                self.grid.step
            )));
        }
        let BetGrid { start, stop, .. } = self.grid;
        let unit = 0.0..=1.0;
        if !unit.contains(&start) || !unit.contains(&stop) {
            return Err(SimError::Config(format!(
                "bet fraction grid {start}..={stop} is outside [0, 1]"
            )));
        }
        if stop < start {
            return Err(SimError::Config(format!(
                "bet fraction grid {start}..={stop} is empty"
            )));
        }
        if self.grid.point_count().is_none() {
            return Err(SimError::Config(format!(
                "bet fraction grid {start}..={stop} step {} exceeds {MAX_GRID_POINTS} points",
                self.grid.step
            )));
        }
        let fractions = self.grid.fractions();
        if let Some(bad) = fractions
            .iter()
            .find(|f| !f.is_finite() || **f < 0.0 || **f > 1.0)
        {
            return Err(SimError::Config(format!(
                "bet fraction {bad} is outside [0, 1]"
            )));
        }

        let PayoffRates { win, lose } = self.rates;
        if !win.is_finite() || !lose.is_finite() || win < 0.0 || lose < 0.0 {
            return Err(SimError::Config(format!(
                "payoff rates must be finite and non-negative, got win={win} lose={lose}"
            )));
        }

        if self.flips.step == 0 {
            return Err(SimError::Config("flip sweep step must be positive".into()));
        }
        if self.flips.start == 0 {
            return Err(SimError::Config("flip counts must be positive".into()));
        }
        if self.flips.stop <= self.flips.start {
            return Err(SimError::Config(format!(
                "flip sweep {}..{} is empty",
                self.flips.start, self.flips.stop
            )));
        }

        if self.workers == 0 {
            return Err(SimError::Config("workers must be positive".into()));
        }

        let fig = &self.figure;
        if fig.dpi == 0 || fig.width_inches == 0 || fig.height_inches == 0 {
            return Err(SimError::Config("figure size and dpi must be positive".into()));
        }
        if fig.rows * fig.cols < fractions.len() {
            return Err(SimError::Config(format!(
                "{}x{} figure grid cannot hold {} panels",
                fig.rows,
                fig.cols,
                fractions.len()
            )));
        }

        Ok(())
    }
}
