//! Shared types for the KELLY-SIM sweep.
//!
//! These types form the data model passed between the engine, the
//! reporter and the driver. A `ResultSet` is created by the sweep,
//! consumed by the reporter and then dropped; nothing here is persisted.

use std::fmt;

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

/// All trial outcomes for a single bet fraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// Share of current wealth wagered on every flip (0.0–1.0).
    pub fraction: f64,
    /// Final wealth of each trial, in the order the trials ran.
    pub outcomes: Vec<f64>,
}

impl Batch {
    pub fn new(fraction: f64, outcomes: Vec<f64>) -> Self {
        Self { fraction, outcomes }
    }

    /// Number of trials in this batch.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Panel / statistics label, e.g. `Betting 30% of Amount`.
    pub fn label(&self) -> String {
        format!("Betting {:.0}% of Amount", self.fraction * 100.0)
    }
}

impl fmt::Display for Batch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} trials)", self.label(), self.outcomes.len())
    }
}

// ---------------------------------------------------------------------------
// Result set
// ---------------------------------------------------------------------------

/// Outcomes of one sweep: every configured bet fraction for one flip count.
///
/// Batches are kept in the order of the configured fraction grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    pub num_flips: usize,
    pub batches: Vec<Batch>,
}

impl ResultSet {
    pub fn new(num_flips: usize, batches: Vec<Batch>) -> Self {
        Self { num_flips, batches }
    }

    /// Bet fractions in grid order.
    pub fn fractions(&self) -> Vec<f64> {
        self.batches.iter().map(|b| b.fraction).collect()
    }

    /// Look up the batch for a fraction (within float tolerance).
    pub fn get(&self, fraction: f64) -> Option<&Batch> {
        self.batches
            .iter()
            .find(|b| (b.fraction - fraction).abs() < 1e-9)
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Batch> {
        self.batches.iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Batch;
    type IntoIter = std::slice::Iter<'a, Batch>;

    fn into_iter(self) -> Self::IntoIter {
        self.batches.iter()
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for KELLY-SIM.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid bet fraction {0}: must be a finite value in [0, 1]")]
    InvalidFraction(f64),

    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    #[error("Render error: {0}")]
    Render(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
