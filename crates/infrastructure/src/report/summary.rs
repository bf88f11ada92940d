//! Human-readable run summary.

use std::fmt::Write as _;

use vigil_domain::{RunReport, ScenarioStatus};

/// Renders the run summary printed to stdout.
///
/// One line per scenario in declaration order; failed and errored
/// scenarios get an indented detail line with the mismatch or error
/// message.
#[must_use]
pub fn render_summary(report: &RunReport) -> String {
    let mut out = String::new();

    let environment = report
        .environment
        .as_deref()
        .map(|label| format!(" ({label})"))
        .unwrap_or_default();
    let _ = writeln!(
        out,
        "suite {}{}: {} passed, {} failed, {} errored in {} ms",
        report.suite, environment, report.passed, report.failed, report.errored, report.duration_ms
    );

    let name_width = report
        .results
        .iter()
        .map(|r| r.name.len())
        .max()
        .unwrap_or(0);
    let request_width = report
        .results
        .iter()
        .map(|r| r.request.len())
        .max()
        .unwrap_or(0);

    for result in &report.results {
        let label = match result.status {
            ScenarioStatus::Passed => "passed ",
            ScenarioStatus::Failed { .. } => "FAILED ",
            ScenarioStatus::Errored { .. } => "ERRORED",
        };
        let attempts = if result.attempts > 1 {
            format!(" (attempt {})", result.attempts)
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            "  {label}  {:<name_width$}  {:<request_width$}  {} ms{attempts}",
            result.name, result.request, result.duration_ms
        );

        match &result.status {
            ScenarioStatus::Passed => {}
            ScenarioStatus::Failed { reason } => {
                let _ = writeln!(out, "           {reason}");
            }
            ScenarioStatus::Errored { message, .. } => {
                let _ = writeln!(out, "           {message}");
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_domain::{ErrorCause, ScenarioResult};

    fn result(name: &str, request: &str, status: ScenarioStatus, attempts: u32) -> ScenarioResult {
        ScenarioResult {
            name: name.to_string(),
            request: request.to_string(),
            status,
            duration_ms: 34,
            attempts,
        }
    }

    #[test]
    fn test_summary_header_and_lines() {
        let report = RunReport::new(
            "todo-api",
            Some("dev".to_string()),
            vec![
                result("list todos", "GET /todos", ScenarioStatus::Passed, 1),
                result(
                    "create todo",
                    "POST /todos",
                    ScenarioStatus::Failed {
                        reason: "expected status = 201, got 500".to_string(),
                    },
                    2,
                ),
                result(
                    "slow endpoint",
                    "GET /slow",
                    ScenarioStatus::Errored {
                        cause: ErrorCause::Timeout,
                        message: "no response within 30000 ms".to_string(),
                    },
                    1,
                ),
            ],
            812,
        );

        let summary = render_summary(&report);
        assert!(summary.starts_with("suite todo-api (dev): 1 passed, 1 failed, 1 errored in 812 ms"));
        assert!(summary.contains("passed   list todos"));
        assert!(summary.contains("FAILED   create todo"));
        assert!(summary.contains("expected status = 201, got 500"));
        assert!(summary.contains("(attempt 2)"));
        assert!(summary.contains("ERRORED  slow endpoint"));
        assert!(summary.contains("no response within 30000 ms"));
    }

    #[test]
    fn test_summary_without_environment_label() {
        let report = RunReport::new(
            "todo-api",
            None,
            vec![result("list todos", "GET /todos", ScenarioStatus::Passed, 1)],
            40,
        );
        let summary = render_summary(&report);
        assert!(summary.starts_with("suite todo-api: 1 passed, 0 failed, 0 errored in 40 ms"));
    }
}
