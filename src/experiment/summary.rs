//! Tabular summary rendering for experiment results.
//!
//! A read-only projection of an [`ExperimentResult`]: one row per attempted
//! condition, in execution order, never filtered. Rendering the same result
//! twice produces byte-identical output.

use crate::experiment::runner::{ExperimentResult, RunResult};

/// Renders the result as a fixed-width text table.
///
/// Columns: condition name, episodes planned, episodes complete, elapsed
/// time rounded to the nearest whole second, and status (`OK` when the run
/// recorded no error, `FAIL` otherwise).
pub fn render_summary(result: &ExperimentResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== Experiment {} Summary ===\n",
        result.experiment_id
    ));
    out.push_str(&format!(
        "Total time: {}s\n\n",
        round_secs(result.total_time.as_millis())
    ));

    out.push_str(&format!(
        "{:<15} {:>10} {:>10} {:>8} {}\n",
        "Condition", "Planned", "Complete", "Time", "Status"
    ));
    out.push_str(&format!(
        "{:<15} {:>10} {:>10} {:>8} {}\n",
        "─────────", "───────", "────────", "────", "──────"
    ));

    for run in &result.runs {
        out.push_str(&render_row(run));
    }

    out
}

fn render_row(run: &RunResult) -> String {
    let status = if run.is_success() { "OK" } else { "FAIL" };
    format!(
        "{:<15} {:>10} {:>10} {:>8} {}\n",
        run.condition,
        run.episodes_planned,
        run.episodes_complete,
        format!("{}s", round_secs(run.elapsed().as_millis())),
        status
    )
}

/// Rounds milliseconds to the nearest whole second.
fn round_secs(millis: u128) -> u128 {
    (millis + 500) / 1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    fn fixed_result() -> ExperimentResult {
        let t0 = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        ExperimentResult {
            experiment_id: "DOE-001".to_string(),
            started_at: t0,
            runs: vec![
                RunResult {
                    condition: "random".to_string(),
                    episodes_planned: 70,
                    episodes_complete: 70,
                    started_at: t0,
                    completed_at: t0 + chrono::Duration::seconds(12),
                    error: None,
                },
                RunResult {
                    condition: "rule_only".to_string(),
                    episodes_planned: 70,
                    episodes_complete: 41,
                    started_at: t0 + chrono::Duration::seconds(12),
                    completed_at: t0 + chrono::Duration::milliseconds(19_700),
                    error: Some("bridge dropped connection".to_string()),
                },
                RunResult {
                    condition: "full_agent".to_string(),
                    episodes_planned: 70,
                    episodes_complete: 70,
                    started_at: t0 + chrono::Duration::seconds(20),
                    completed_at: t0 + chrono::Duration::seconds(35),
                    error: None,
                },
            ],
            total_time: Duration::from_secs(35),
        }
    }

    #[test]
    fn test_rows_in_run_order_with_status() {
        let rendered = render_summary(&fixed_result());
        let lines: Vec<&str> = rendered.lines().collect();

        assert!(lines[0].contains("DOE-001"));
        assert!(lines[1].contains("Total time: 35s"));

        let rows: Vec<&&str> = lines
            .iter()
            .filter(|l| {
                l.starts_with("random") || l.starts_with("rule_only") || l.starts_with("full_agent")
            })
            .collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with("random"));
        assert!(rows[0].ends_with("OK"));
        assert!(rows[1].starts_with("rule_only"));
        assert!(rows[1].contains("41"));
        assert!(rows[1].ends_with("FAIL"));
        assert!(rows[2].starts_with("full_agent"));
        assert!(rows[2].ends_with("OK"));
    }

    #[test]
    fn test_failed_runs_are_never_dropped() {
        let rendered = render_summary(&fixed_result());
        assert!(rendered.contains("rule_only"));
        assert!(rendered.contains("FAIL"));
    }

    #[test]
    fn test_duration_rounds_to_nearest_second() {
        // rule_only ran 7.7s; the table shows 8s.
        let rendered = render_summary(&fixed_result());
        let row = rendered
            .lines()
            .find(|l| l.starts_with("rule_only"))
            .unwrap();
        assert!(row.contains("8s"));

        assert_eq!(round_secs(0), 0);
        assert_eq!(round_secs(499), 0);
        assert_eq!(round_secs(500), 1);
        assert_eq!(round_secs(12_400), 12);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let result = fixed_result();
        assert_eq!(render_summary(&result), render_summary(&result));
    }

    #[test]
    fn test_empty_result_renders_header_only() {
        let result = ExperimentResult {
            experiment_id: "EXP-EMPTY".to_string(),
            started_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
            runs: Vec::new(),
            total_time: Duration::from_secs(0),
        };
        let rendered = render_summary(&result);
        assert!(rendered.contains("EXP-EMPTY"));
        assert_eq!(rendered.lines().count(), 5); // title, total, blank, header, rule
    }
}
