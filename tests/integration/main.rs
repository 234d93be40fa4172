//! Integration tests for KELLY-SIM.

mod simulation;
mod reporting;
