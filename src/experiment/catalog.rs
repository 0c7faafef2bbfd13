//! Catalog of named experiment designs.
//!
//! Each entry maps an experiment id to a canonical [`RunConfig`]. Designs
//! are fixed here rather than loaded from files: the experiment definitions
//! are part of the research record and changing them silently would break
//! comparability between invocations.

use crate::error::CatalogError;
use crate::experiment::condition::{Condition, RunConfig};
use crate::experiment::seed::{
    default_seed_set, generate_seed_set, DEFAULT_SEED_BASE, DEFAULT_SEED_STEP,
};

/// Identifier of the standard OFAT baseline comparison experiment.
pub const DOE_001: &str = "DOE-001";

/// The factor varied across DOE-001 conditions.
pub const DECISION_MODE_FACTOR: &str = "DECISION_MODE";

/// A catalog entry, as shown by the `list` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExperimentInfo {
    /// Experiment identifier accepted by `run`.
    pub id: &'static str,
    /// Human-readable title.
    pub title: &'static str,
}

/// Returns the experiments this binary knows how to run.
pub fn known_experiments() -> &'static [ExperimentInfo] {
    &[ExperimentInfo {
        id: DOE_001,
        title: "OFAT Baseline Comparison (Random vs Rule-Only vs Full RAG)",
    }]
}

/// Builds the canonical config for a named experiment.
///
/// An unknown id fails with [`CatalogError::UnknownExperiment`] before any
/// execution is attempted. When `episodes_per_condition` is given, every
/// condition's episode count and seed sequence are regenerated together from
/// the canonical formula; the two are never overridden independently.
pub fn experiment_config(
    experiment_id: &str,
    episodes_per_condition: Option<usize>,
) -> Result<RunConfig, CatalogError> {
    let config = match experiment_id {
        DOE_001 => doe001_config(),
        other => return Err(CatalogError::UnknownExperiment(other.to_string())),
    };

    Ok(match episodes_per_condition {
        Some(episodes) => override_episodes(config, episodes),
        None => config,
    })
}

/// The standard DOE-001 design: three conditions differing only in the
/// `DECISION_MODE` level, 70 episodes each on the canonical seed set.
pub fn doe001_config() -> RunConfig {
    let seeds = default_seed_set();
    let episodes = seeds.len();

    RunConfig::new(DOE_001)
        .with_condition(
            Condition::new("random", episodes, seeds.clone())
                .with_factor(DECISION_MODE_FACTOR, "random"),
        )
        .with_condition(
            Condition::new("rule_only", episodes, seeds.clone())
                .with_factor(DECISION_MODE_FACTOR, "rule_only"),
        )
        .with_condition(
            Condition::new("full_agent", episodes, seeds)
                .with_factor(DECISION_MODE_FACTOR, "full_agent"),
        )
}

/// Rebuilds every condition with the requested episode count and a freshly
/// generated seed sequence of matching length.
fn override_episodes(config: RunConfig, episodes: usize) -> RunConfig {
    let conditions = config
        .conditions
        .into_iter()
        .map(|c| {
            c.with_episode_budget(
                episodes,
                generate_seed_set(DEFAULT_SEED_BASE, DEFAULT_SEED_STEP, episodes),
            )
        })
        .collect();

    RunConfig {
        conditions,
        ..config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doe001_condition_order() {
        let config = doe001_config();
        let names: Vec<&str> = config.conditions.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["random", "rule_only", "full_agent"]);
    }

    #[test]
    fn test_doe001_shares_seed_set_across_conditions() {
        let config = doe001_config();
        assert_eq!(config.experiment_id, DOE_001);
        assert_eq!(config.conditions.len(), 3);

        let first = &config.conditions[0].seeds;
        assert_eq!(first.len(), 70);
        assert_eq!(first[0], 42);
        for condition in &config.conditions {
            assert_eq!(condition.episodes, 70);
            assert_eq!(&condition.seeds, first);
        }
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_doe001_varies_only_decision_mode() {
        let config = doe001_config();
        for condition in &config.conditions {
            assert_eq!(condition.factor_levels.len(), 1);
            assert_eq!(
                condition.factor_levels.get(DECISION_MODE_FACTOR),
                Some(&condition.name)
            );
        }
    }

    #[test]
    fn test_episode_override_regenerates_count_and_seeds() {
        let config = experiment_config(DOE_001, Some(12)).expect("known experiment");

        for condition in &config.conditions {
            assert_eq!(condition.episodes, 12);
            assert_eq!(condition.seeds.len(), 12);
            assert_eq!(condition.seeds[0], 42);
            assert_eq!(condition.seeds[11], 42 + 11 * 31);
        }
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_no_override_keeps_defaults() {
        let config = experiment_config(DOE_001, None).expect("known experiment");
        assert_eq!(config.conditions[0].episodes, 70);
    }

    #[test]
    fn test_unknown_experiment() {
        match experiment_config("DOE-999", None) {
            Err(CatalogError::UnknownExperiment(id)) => assert_eq!(id, "DOE-999"),
            other => panic!("expected UnknownExperiment, got {:?}", other),
        }
    }

    #[test]
    fn test_known_experiments_lists_doe001() {
        let known = known_experiments();
        assert!(known.iter().any(|e| e.id == DOE_001));
    }
}
