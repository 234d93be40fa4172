//! KELLY-SIM — Monte Carlo sweep of repeated-betting wealth trajectories
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod engine;
pub mod strategy;
pub mod report;
pub mod storage;
pub mod driver;
