//! External collaborators that execute a condition's work.
//!
//! The engine never talks to the simulated environment directly; it drives
//! a [`ConditionWorkflow`] — configure the environment for a condition's
//! factor levels, then run one episode per seed. Implementations own all
//! the infrastructure details (compose stack, glue scripts, telemetry);
//! the runner only observes success or failure.

pub mod compose;

pub use compose::ComposeWorkflow;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by a workflow implementation.
///
/// The runner records these opaquely on the condition's
/// [`RunResult`](crate::experiment::RunResult) and moves on; retry policy,
/// if any, belongs to the implementation.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Applying factor levels to the environment failed.
    #[error("environment configuration failed: {0}")]
    Configure(String),

    /// A seeded episode failed or did not finish.
    #[error("episode with seed {seed} failed: {reason}")]
    Episode { seed: i64, reason: String },

    /// IO error while driving external processes.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of one seeded episode.
///
/// The engine only needs to know the episode finished; the fields are kept
/// for the telemetry sink and for logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeOutcome {
    /// Seed the episode ran under.
    pub seed: i64,
    /// Wall-clock duration of the episode.
    pub duration: Duration,
}

/// Capability set the runner needs from the external world.
///
/// One instance serves a whole experiment: `configure` is called once per
/// condition, then `run_episode` once per seed, strictly sequentially.
#[async_trait]
pub trait ConditionWorkflow: Send + Sync {
    /// Applies a condition's factor-level assignment to the simulated
    /// environment and agent before its episodes run.
    async fn configure(
        &self,
        factor_levels: &HashMap<String, String>,
    ) -> Result<(), WorkflowError>;

    /// Executes one episode deterministically seeded with `seed`.
    async fn run_episode(&self, seed: i64) -> Result<EpisodeOutcome, WorkflowError>;
}
