//! Error types for doomlab operations.
//!
//! Configuration and catalog errors are rejected before any execution
//! starts; per-condition workflow failures never appear here — they are
//! contained on the condition's `RunResult` by the runner.

use thiserror::Error;

/// Errors detected when validating a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("condition '{condition}' plans {episodes} episodes but provides {seeds} seeds")]
    SeedCountMismatch {
        condition: String,
        episodes: usize,
        seeds: usize,
    },

    #[error("condition '{condition}' plans zero episodes")]
    NoEpisodes { condition: String },

    #[error("duplicate condition name '{0}'")]
    DuplicateCondition(String),
}

/// Errors at the experiment-selection boundary.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown experiment '{0}'")]
    UnknownExperiment(String),
}

/// Errors while persisting or loading experiment results.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
