//! Run reporting types.
//!
//! The shapes here are the machine-readable contract the harness emits
//! into: one entry per scenario with name, status, duration and failure
//! reason, aggregated under a run header.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::state::ScenarioStatus;

/// Terminal result of one scenario, independent of all others in the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Scenario name.
    pub name: String,
    /// Request line of the scenario's plan (e.g. "GET /todos").
    pub request: String,
    /// Terminal status with failure/error context.
    #[serde(flatten)]
    pub status: ScenarioStatus,
    /// Wall-clock duration of the reported attempt in milliseconds.
    pub duration_ms: u64,
    /// Number of whole-scenario attempts made (0 when cancelled before
    /// the first attempt started).
    pub attempts: u32,
}

/// Aggregated results of one suite run, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique identifier of this run.
    pub run_id: Uuid,
    /// Suite name.
    pub suite: String,
    /// Environment label the run targeted, when one was selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// Total number of scenarios.
    pub total: usize,
    /// Number of scenarios whose checks all passed.
    pub passed: usize,
    /// Number of scenarios with a check mismatch.
    pub failed: usize,
    /// Number of scenarios that errored before a verdict.
    pub errored: usize,
    /// Wall-clock duration of the whole run in milliseconds.
    pub duration_ms: u64,
    /// Per-scenario results, re-sorted to declaration order.
    pub results: Vec<ScenarioResult>,
}

impl RunReport {
    /// Builds a report from collected results, computing the tallies.
    #[must_use]
    pub fn new(
        suite: impl Into<String>,
        environment: Option<String>,
        results: Vec<ScenarioResult>,
        duration_ms: u64,
    ) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.status.is_passed()).count();
        let failed = results.iter().filter(|r| r.status.is_failed()).count();
        let errored = total - passed - failed;

        Self {
            run_id: Uuid::now_v7(),
            suite: suite.into(),
            environment,
            generated_at: Utc::now(),
            total,
            passed,
            failed,
            errored,
            duration_ms,
            results,
        }
    }

    /// Returns true if every scenario passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0 && self.errored == 0
    }
}
