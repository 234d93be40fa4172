//! Simulation engine — trial recurrence, per-fraction batches, and the
//! parallel sweep across the bet fraction grid.

pub mod trial;
pub mod batch;
pub mod sweep;

pub use batch::{run_batch, BatchSpec};
pub use sweep::run_sweep;
pub use trial::{final_wealth, run_trial};
