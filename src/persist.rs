//! Persistence of experiment results.
//!
//! Each finished (or cancelled-partial) run is written as a pretty-printed
//! JSON document under `<data_dir>/results/`, named after the experiment id
//! and the run's start instant so repeated invocations never clobber each
//! other and sort chronologically.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::PersistError;
use crate::experiment::ExperimentResult;

/// Subdirectory of the data dir holding result documents.
const RESULTS_DIR: &str = "results";

/// Timestamp layout used in result file names; lexicographic order equals
/// chronological order.
const FILE_STAMP: &str = "%Y%m%d-%H%M%S";

/// Writes the result under the data directory and returns the file path.
pub fn save_result(data_dir: &Path, result: &ExperimentResult) -> Result<PathBuf, PersistError> {
    let dir = data_dir.join(RESULTS_DIR);
    fs::create_dir_all(&dir)?;

    let path = dir.join(format!(
        "{}-{}.json",
        result.experiment_id,
        result.started_at.format(FILE_STAMP)
    ));
    let json = serde_json::to_string_pretty(result)?;
    fs::write(&path, json)?;

    debug!(path = %path.display(), "Saved experiment result");
    Ok(path)
}

/// Loads the most recently started saved result for an experiment, or
/// `None` when nothing has been recorded yet.
pub fn load_latest_result(
    data_dir: &Path,
    experiment_id: &str,
) -> Result<Option<ExperimentResult>, PersistError> {
    let dir = data_dir.join(RESULTS_DIR);
    if !dir.exists() {
        return Ok(None);
    }

    let prefix = format!("{experiment_id}-");
    let mut latest: Option<PathBuf> = None;
    for entry in fs::read_dir(&dir)? {
        let path = entry?.path();
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };
        if !name.starts_with(&prefix) || !name.ends_with(".json") {
            continue;
        }
        if latest.as_deref().map_or(true, |l| path.as_path() > l) {
            latest = Some(path);
        }
    }

    match latest {
        Some(path) => {
            let json = fs::read_to_string(&path)?;
            Ok(Some(serde_json::from_str(&json)?))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::RunResult;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;
    use tempfile::TempDir;

    fn result_at(hour: u32) -> ExperimentResult {
        let t0 = Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0).unwrap();
        ExperimentResult {
            experiment_id: "DOE-001".to_string(),
            started_at: t0,
            runs: vec![RunResult {
                condition: "random".to_string(),
                episodes_planned: 2,
                episodes_complete: 2,
                started_at: t0,
                completed_at: t0 + chrono::Duration::seconds(5),
                error: None,
            }],
            total_time: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let result = result_at(9);

        let path = save_result(temp.path(), &result).unwrap();
        assert!(path.exists());
        assert!(path.to_string_lossy().contains("DOE-001-20260301-090000"));

        let loaded = load_latest_result(temp.path(), "DOE-001").unwrap().unwrap();
        assert_eq!(loaded.experiment_id, "DOE-001");
        assert_eq!(loaded.runs.len(), 1);
        assert_eq!(loaded.total_time, Duration::from_secs(5));
    }

    #[test]
    fn test_load_picks_most_recent() {
        let temp = TempDir::new().unwrap();
        save_result(temp.path(), &result_at(9)).unwrap();
        let later = ExperimentResult {
            total_time: Duration::from_secs(99),
            ..result_at(17)
        };
        save_result(temp.path(), &later).unwrap();

        let loaded = load_latest_result(temp.path(), "DOE-001").unwrap().unwrap();
        assert_eq!(loaded.total_time, Duration::from_secs(99));
    }

    #[test]
    fn test_load_missing_returns_none() {
        let temp = TempDir::new().unwrap();
        assert!(load_latest_result(temp.path(), "DOE-001")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_load_ignores_other_experiments() {
        let temp = TempDir::new().unwrap();
        save_result(temp.path(), &result_at(9)).unwrap();

        assert!(load_latest_result(temp.path(), "DOE-999")
            .unwrap()
            .is_none());
    }
}
