//! Condition and run configuration for experiments.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One experimental arm: a fixed factor-level assignment run over a fixed
/// number of seeded episodes.
///
/// All conditions of an experiment conventionally carry the same seed
/// sequence so that arms are compared under matched randomness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    /// Unique name within the experiment (e.g. "random", "full_agent").
    pub name: String,
    /// Factor name to assigned level for this arm.
    pub factor_levels: HashMap<String, String>,
    /// Number of episodes to run under this condition.
    pub episodes: usize,
    /// One seed per episode, assigned by position.
    pub seeds: Vec<i64>,
}

impl Condition {
    /// Creates a condition with the given name and episode budget.
    ///
    /// `seeds` must have one entry per episode; [`RunConfig::validate`]
    /// enforces this before any execution starts.
    pub fn new(name: impl Into<String>, episodes: usize, seeds: Vec<i64>) -> Self {
        Self {
            name: name.into(),
            factor_levels: HashMap::new(),
            episodes,
            seeds,
        }
    }

    /// Assigns a level to a factor.
    pub fn with_factor(mut self, factor: impl Into<String>, level: impl Into<String>) -> Self {
        self.factor_levels.insert(factor.into(), level.into());
        self
    }

    /// Replaces the episode budget, regenerating count and seeds together.
    ///
    /// The two fields must never be set independently: a condition with a
    /// seed sequence whose length differs from its episode count is invalid.
    pub fn with_episode_budget(mut self, episodes: usize, seeds: Vec<i64>) -> Self {
        self.episodes = episodes;
        self.seeds = seeds;
        self
    }
}

/// One experiment definition: identity plus the ordered list of conditions.
///
/// Condition order is execution order and is preserved all the way through
/// to the reported results. The runner treats a `RunConfig` as immutable
/// once handed to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Opaque experiment identifier (e.g. "DOE-001").
    pub experiment_id: String,
    /// Conditions in execution order.
    pub conditions: Vec<Condition>,
    /// Compose file describing the simulated environment. Consumed by the
    /// workflow implementation, never interpreted by the engine.
    pub compose_file: PathBuf,
    /// Directory holding the glue scripts that drive episodes. Externally
    /// consumed, like `compose_file`.
    pub glue_script_dir: PathBuf,
}

impl RunConfig {
    /// Creates an empty config for the given experiment id with default
    /// external-resource paths.
    pub fn new(experiment_id: impl Into<String>) -> Self {
        Self {
            experiment_id: experiment_id.into(),
            conditions: Vec::new(),
            compose_file: PathBuf::from("infra/docker-compose.yml"),
            glue_script_dir: PathBuf::from("glue"),
        }
    }

    /// Appends a condition; declaration order is execution order.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Sets the compose file path.
    pub fn with_compose_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.compose_file = path.into();
        self
    }

    /// Sets the glue script directory.
    pub fn with_glue_script_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.glue_script_dir = dir.into();
        self
    }

    /// Total episodes planned across all conditions.
    pub fn total_episodes(&self) -> usize {
        self.conditions.iter().map(|c| c.episodes).sum()
    }

    /// Checks the configuration invariants before execution.
    ///
    /// Rejects conditions whose seed sequence length does not match their
    /// episode count, conditions with zero episodes, and duplicate condition
    /// names. Called by the runner before any external work starts, so a
    /// broken config never produces a partial run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut names = HashSet::new();
        for condition in &self.conditions {
            if !names.insert(condition.name.as_str()) {
                return Err(ConfigError::DuplicateCondition(condition.name.clone()));
            }
            if condition.episodes == 0 {
                return Err(ConfigError::NoEpisodes {
                    condition: condition.name.clone(),
                });
            }
            if condition.seeds.len() != condition.episodes {
                return Err(ConfigError::SeedCountMismatch {
                    condition: condition.name.clone(),
                    episodes: condition.episodes,
                    seeds: condition.seeds.len(),
                });
            }
        }
        Ok(())
    }
}
