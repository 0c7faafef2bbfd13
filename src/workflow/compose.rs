//! Compose-backed workflow implementation.
//!
//! Drives the real simulated environment: factor levels are exported into
//! the compose stack's service environment and the stack is recreated per
//! condition, then each episode is executed by the glue episode runner with
//! its seed. Both steps shell out through `tokio::process` and are bounded
//! by timeouts; a hung container or script surfaces as an episode failure
//! rather than wedging the experiment.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::{ConditionWorkflow, EpisodeOutcome, WorkflowError};

/// Name of the glue script that drives a single episode.
const EPISODE_RUNNER_SCRIPT: &str = "episode_runner.py";

/// Longest stderr excerpt carried into an error message.
const STDERR_EXCERPT_LEN: usize = 500;

/// Executes conditions against a docker-compose environment.
#[derive(Debug, Clone)]
pub struct ComposeWorkflow {
    compose_file: PathBuf,
    glue_script_dir: PathBuf,
    python: String,
    configure_timeout: Duration,
    episode_timeout: Duration,
}

impl ComposeWorkflow {
    /// Creates a workflow for the given compose file and glue script
    /// directory with default timeouts.
    pub fn new(compose_file: impl Into<PathBuf>, glue_script_dir: impl Into<PathBuf>) -> Self {
        Self {
            compose_file: compose_file.into(),
            glue_script_dir: glue_script_dir.into(),
            python: "python3".to_string(),
            configure_timeout: Duration::from_secs(180),
            episode_timeout: Duration::from_secs(300),
        }
    }

    /// Overrides the Python interpreter used for glue scripts.
    pub fn with_python(mut self, python: impl Into<String>) -> Self {
        self.python = python.into();
        self
    }

    /// Sets the per-episode timeout.
    pub fn with_episode_timeout(mut self, timeout: Duration) -> Self {
        self.episode_timeout = timeout;
        self
    }

    /// Sets the timeout for bringing the compose stack up.
    pub fn with_configure_timeout(mut self, timeout: Duration) -> Self {
        self.configure_timeout = timeout;
        self
    }

    /// Tears the compose stack down. Called by the CLI after a run; the
    /// runner itself never manages environment lifetime.
    pub async fn shutdown(&self) -> Result<(), WorkflowError> {
        info!(compose_file = %self.compose_file.display(), "Stopping compose stack");
        let output = Command::new("docker")
            .args(self.compose_args(&["down"]))
            .output()
            .await?;

        if !output.status.success() {
            warn!(
                stderr = %stderr_excerpt(&output.stderr),
                "compose down exited non-zero"
            );
        }
        Ok(())
    }

    /// Builds `docker compose -f <file> <action...>` argument lists.
    fn compose_args(&self, action: &[&str]) -> Vec<String> {
        let mut args = vec![
            "compose".to_string(),
            "-f".to_string(),
            self.compose_file.display().to_string(),
        ];
        args.extend(action.iter().map(|s| s.to_string()));
        args
    }

    /// Path to the glue episode runner script.
    fn episode_script(&self) -> PathBuf {
        self.glue_script_dir.join(EPISODE_RUNNER_SCRIPT)
    }
}

#[async_trait]
impl ConditionWorkflow for ComposeWorkflow {
    async fn configure(
        &self,
        factor_levels: &HashMap<String, String>,
    ) -> Result<(), WorkflowError> {
        info!(
            compose_file = %self.compose_file.display(),
            factors = factor_levels.len(),
            "Recreating compose stack for condition"
        );

        let mut cmd = Command::new("docker");
        cmd.args(self.compose_args(&["up", "-d", "--force-recreate"]));
        // Compose interpolates these into the service environment.
        for (factor, level) in factor_levels {
            cmd.env(factor, level);
        }

        let output = tokio::time::timeout(self.configure_timeout, cmd.output())
            .await
            .map_err(|_| {
                WorkflowError::Configure(format!(
                    "compose up timed out after {:?}",
                    self.configure_timeout
                ))
            })??;

        if !output.status.success() {
            return Err(WorkflowError::Configure(format!(
                "compose up exited with {}: {}",
                output.status.code().unwrap_or(-1),
                stderr_excerpt(&output.stderr)
            )));
        }

        debug!("Compose stack ready");
        Ok(())
    }

    async fn run_episode(&self, seed: i64) -> Result<EpisodeOutcome, WorkflowError> {
        let script = self.episode_script();
        let start = Instant::now();

        debug!(seed, script = %script.display(), "Starting episode");

        let output = tokio::time::timeout(
            self.episode_timeout,
            Command::new(&self.python)
                .arg(&script)
                .arg("--seed")
                .arg(seed.to_string())
                .output(),
        )
        .await
        .map_err(|_| WorkflowError::Episode {
            seed,
            reason: format!("timed out after {:?}", self.episode_timeout),
        })??;

        let duration = start.elapsed();

        if !output.status.success() {
            return Err(WorkflowError::Episode {
                seed,
                reason: format!(
                    "episode runner exited with {}: {}",
                    output.status.code().unwrap_or(-1),
                    stderr_excerpt(&output.stderr)
                ),
            });
        }

        debug!(seed, secs = duration.as_secs(), "Episode complete");
        Ok(EpisodeOutcome { seed, duration })
    }
}

/// Extracts a bounded, lossy excerpt from captured stderr.
fn stderr_excerpt(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let trimmed = text.trim();
    if trimmed.len() <= STDERR_EXCERPT_LEN {
        trimmed.to_string()
    } else {
        format!("{}... [truncated]", &trimmed[..STDERR_EXCERPT_LEN])
    }
}
