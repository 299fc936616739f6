//! Shell parsing utilities for command-gate
//!
//! Provides heuristic tokenization and wrapper command detection.

pub mod shell;
pub mod wrapper;
