//! Command-line interface for doomlab.
//!
//! Provides commands for running experiments, listing the experiment
//! catalog, inspecting recorded results, and bootstrapping the
//! environment directory tree.

mod commands;

pub use commands::{parse_cli, run, run_with_cli};
