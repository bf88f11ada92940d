//! Scenario execution state machine.
//!
//! A scenario moves `Pending -> Running -> terminal`; the terminal states
//! are the status categories carried in a [`ScenarioResult`]. Terminal
//! states are final: a retry is a fresh pass through the machine, never a
//! transition out of a terminal state.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::Scenario;
use super::report::ScenarioResult;

/// Terminal outcome category of one scenario attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScenarioStatus {
    /// Every check passed.
    Passed,
    /// A check did not pass; the request itself completed.
    Failed {
        /// Mismatch description of the first failing check.
        reason: String,
    },
    /// The request never produced a response to check.
    Errored {
        /// Error category.
        cause: ErrorCause,
        /// Human-readable error message.
        message: String,
    },
}

impl ScenarioStatus {
    /// Creates a cancelled status with the given message.
    #[must_use]
    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::Errored {
            cause: ErrorCause::Cancelled,
            message: message.into(),
        }
    }

    /// Returns true if every check passed.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Returns true if a check mismatched.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Returns true if the request itself errored.
    #[must_use]
    pub const fn is_errored(&self) -> bool {
        matches!(self, Self::Errored { .. })
    }

    /// Returns the status label used in summaries.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed { .. } => "failed",
            Self::Errored { .. } => "errored",
        }
    }
}

/// Categories of scenario errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCause {
    /// No response arrived within the per-request timeout.
    Timeout,
    /// Connection-level failure (DNS, refused connection, aborted stream).
    Transport,
    /// The run was cancelled before this scenario reached a verdict.
    Cancelled,
}

/// Pre-terminal execution state of one scenario attempt.
#[derive(Debug, Clone, Copy)]
pub enum ScenarioState {
    /// Not yet dispatched.
    Pending,
    /// Request in flight or checks being evaluated.
    Running {
        /// When the attempt started, for duration measurement.
        started_at: Instant,
    },
}

impl ScenarioState {
    /// Creates the initial state.
    #[must_use]
    pub const fn pending() -> Self {
        Self::Pending
    }

    /// Transitions `Pending -> Running`, stamping the start time.
    #[must_use]
    pub fn start(self) -> Self {
        match self {
            Self::Pending => Self::Running {
                started_at: Instant::now(),
            },
            running @ Self::Running { .. } => running,
        }
    }

    /// Returns true if the scenario has not been dispatched yet.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Transitions into a terminal result.
    ///
    /// A state that never left `Pending` (cancelled before start) reports
    /// a zero duration.
    #[must_use]
    pub fn finish(self, scenario: &Scenario, status: ScenarioStatus, attempts: u32) -> ScenarioResult {
        let duration = match self {
            Self::Pending => Duration::ZERO,
            Self::Running { started_at } => started_at.elapsed(),
        };
        ScenarioResult {
            name: scenario.name.clone(),
            request: scenario.request.request_line(),
            status,
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            attempts,
        }
    }
}
