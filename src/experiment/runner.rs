//! Sequential experiment execution and result aggregation.
//!
//! The runner walks the conditions of a [`RunConfig`] in declared order,
//! delegating each condition's environment setup and episodes to a
//! [`ConditionWorkflow`], and collects one [`RunResult`] per attempted
//! condition into an [`ExperimentResult`]. A failing condition is recorded
//! and the run moves on; only cancellation and invalid configuration stop
//! the experiment early.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::error::ConfigError;
use crate::experiment::cancel::CancellationToken;
use crate::experiment::condition::{Condition, RunConfig};
use crate::workflow::ConditionWorkflow;

/// Outcome of executing one condition.
///
/// Created when the condition starts and frozen once its run returns.
/// `error` is present iff the condition did not complete successfully, in
/// which case `episodes_complete` counts only the episodes that finished
/// strictly before the failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Name of the condition this result belongs to.
    pub condition: String,
    /// Episodes the condition was configured to run.
    pub episodes_planned: usize,
    /// Episodes that actually completed (`0 <= complete <= planned`).
    pub episodes_complete: usize,
    /// Wall-clock instant the condition started.
    pub started_at: DateTime<Utc>,
    /// Wall-clock instant the condition finished or failed.
    pub completed_at: DateTime<Utc>,
    /// Opaque description of the workflow failure, if any.
    pub error: Option<String>,
}

impl RunResult {
    /// Elapsed wall-clock time of this condition's run.
    pub fn elapsed(&self) -> Duration {
        (self.completed_at - self.started_at)
            .to_std()
            .unwrap_or_default()
    }

    /// True when the condition completed without a workflow error.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate outcome of one experiment run.
///
/// `runs` is append-only and mirrors the input condition order; conditions
/// never started (because of cancellation) are simply absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentResult {
    /// Identifier of the experiment that produced this result.
    pub experiment_id: String,
    /// Wall-clock instant the run started.
    pub started_at: DateTime<Utc>,
    /// One entry per attempted condition, in execution order.
    pub runs: Vec<RunResult>,
    /// Wall-clock duration of the whole run.
    pub total_time: Duration,
}

impl ExperimentResult {
    fn new(experiment_id: impl Into<String>) -> Self {
        Self {
            experiment_id: experiment_id.into(),
            started_at: Utc::now(),
            runs: Vec::new(),
            total_time: Duration::ZERO,
        }
    }

    /// Total episodes completed across all attempted conditions.
    pub fn episodes_complete(&self) -> usize {
        self.runs.iter().map(|r| r.episodes_complete).sum()
    }

    /// True when every attempted condition completed without error.
    pub fn all_succeeded(&self) -> bool {
        self.runs.iter().all(RunResult::is_success)
    }
}

/// Errors surfaced by [`Runner::run`].
///
/// Per-condition workflow failures are not errors at this level; they are
/// contained in the corresponding [`RunResult`].
#[derive(Debug, Error)]
pub enum RunError {
    /// The configuration violated an invariant; nothing was executed.
    #[error("invalid run configuration: {0}")]
    Config(#[from] ConfigError),

    /// The caller cancelled the run. `partial` holds the results of every
    /// condition that was attempted before the signal was observed.
    #[error("experiment '{experiment_id}' cancelled after {completed} of {planned} conditions")]
    Cancelled {
        experiment_id: String,
        completed: usize,
        planned: usize,
        partial: ExperimentResult,
    },
}

/// Executes experiments: one condition at a time, episodes in seed order.
pub struct Runner {
    config: RunConfig,
    workflow: Box<dyn ConditionWorkflow>,
}

impl Runner {
    /// Creates a runner for the given config and workflow implementation.
    pub fn new(config: RunConfig, workflow: Box<dyn ConditionWorkflow>) -> Self {
        Self { config, workflow }
    }

    /// Runs every condition sequentially and returns the aggregate result.
    ///
    /// The configuration is validated up front; an invalid config fails
    /// before any external work starts. Conditions execute strictly in
    /// declared order and episodes strictly in seed order — result
    /// interpretation depends on order matching the experimental design.
    ///
    /// Cancellation is observed at condition boundaries only: the token is
    /// checked before each condition starts, so a signal arriving
    /// mid-condition takes effect once that condition finishes. On
    /// cancellation the partially-built result is returned inside
    /// [`RunError::Cancelled`]; conditions not yet started have no entry.
    ///
    /// A condition whose workflow fails is recorded with its error and the
    /// run proceeds to the next condition; such failures never abort the
    /// experiment and never surface as a `run` error.
    pub async fn run(&self, cancel: &CancellationToken) -> Result<ExperimentResult, RunError> {
        self.config.validate()?;

        let overall = Instant::now();
        let mut result = ExperimentResult::new(&self.config.experiment_id);
        let planned = self.config.conditions.len();

        info!(
            experiment_id = %self.config.experiment_id,
            conditions = planned,
            total_episodes = self.config.total_episodes(),
            "Starting experiment"
        );

        for (index, condition) in self.config.conditions.iter().enumerate() {
            if cancel.is_cancelled() {
                result.total_time = overall.elapsed();
                warn!(
                    experiment_id = %self.config.experiment_id,
                    completed = result.runs.len(),
                    planned,
                    "Experiment cancelled"
                );
                return Err(RunError::Cancelled {
                    experiment_id: self.config.experiment_id.clone(),
                    completed: result.runs.len(),
                    planned,
                    partial: result,
                });
            }

            info!(
                condition = %condition.name,
                index = index + 1,
                total = planned,
                episodes = condition.episodes,
                "Starting condition"
            );

            let run = self.run_condition(condition).await;
            match &run.error {
                Some(err) => error!(
                    condition = %condition.name,
                    complete = run.episodes_complete,
                    planned = run.episodes_planned,
                    error = %err,
                    "Condition failed"
                ),
                None => info!(
                    condition = %condition.name,
                    complete = run.episodes_complete,
                    planned = run.episodes_planned,
                    "Condition complete"
                ),
            }
            result.runs.push(run);
        }

        result.total_time = overall.elapsed();
        info!(
            experiment_id = %result.experiment_id,
            total_secs = result.total_time.as_secs(),
            episodes_complete = result.episodes_complete(),
            "Experiment complete"
        );
        Ok(result)
    }

    /// Executes one condition to completion, containing any workflow error.
    ///
    /// The workflow's errors are opaque here: no interpretation, no retry.
    /// `episodes_complete` counts completions strictly before a failure.
    async fn run_condition(&self, condition: &Condition) -> RunResult {
        let started_at = Utc::now();
        let mut episodes_complete = 0;
        let mut run_error = None;

        match self.workflow.configure(&condition.factor_levels).await {
            Err(err) => run_error = Some(err.to_string()),
            Ok(()) => {
                for &seed in &condition.seeds {
                    match self.workflow.run_episode(seed).await {
                        Ok(_) => episodes_complete += 1,
                        Err(err) => {
                            run_error = Some(err.to_string());
                            break;
                        }
                    }
                }
            }
        }

        RunResult {
            condition: condition.name.clone(),
            episodes_planned: condition.episodes,
            episodes_complete,
            started_at,
            completed_at: Utc::now(),
            error: run_error,
        }
    }
}
