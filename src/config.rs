//! Application-level path configuration.
//!
//! Defaults for the external resources the orchestrator touches. Values
//! are threaded explicitly through the CLI into the experiment config —
//! there is no process-wide mutable configuration state.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default locations of the environment the orchestrator drives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Compose file describing the simulated environment stack.
    pub compose_file: PathBuf,
    /// Directory where experiment results and episode data land.
    pub data_dir: PathBuf,
    /// Directory holding agent configuration templates.
    pub agent_templates_dir: PathBuf,
    /// Directory holding the glue scripts that drive episodes.
    pub glue_script_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            compose_file: PathBuf::from("infra/docker-compose.yml"),
            data_dir: PathBuf::from("volumes/data"),
            agent_templates_dir: PathBuf::from("volumes/agents/templates"),
            glue_script_dir: PathBuf::from("glue"),
        }
    }
}

impl AppConfig {
    /// Directories `init` creates before the first run.
    pub fn bootstrap_dirs(&self) -> Vec<PathBuf> {
        vec![
            self.data_dir.clone(),
            PathBuf::from("volumes/agents/active"),
            self.agent_templates_dir.clone(),
            PathBuf::from("volumes/opensearch"),
        ]
    }
}
