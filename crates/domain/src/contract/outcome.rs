//! Check outcome type

use serde::{Deserialize, Serialize};

/// Result of evaluating a single contract check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// Description of the check that was evaluated.
    pub description: String,
    /// Whether the check passed.
    pub passed: bool,
    /// Actual value observed (for display).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    /// Mismatch description if the check failed (expected vs. actual).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mismatch: Option<String>,
}

impl CheckOutcome {
    /// Creates a passed outcome.
    #[must_use]
    pub fn pass(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            passed: true,
            actual: None,
            mismatch: None,
        }
    }

    /// Creates a passed outcome with the observed value.
    #[must_use]
    pub fn pass_with(description: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            actual: Some(actual.into()),
            ..Self::pass(description)
        }
    }

    /// Creates a failed outcome.
    #[must_use]
    pub fn fail(description: impl Into<String>, mismatch: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            passed: false,
            actual: None,
            mismatch: Some(mismatch.into()),
        }
    }

    /// Creates a failed outcome with the observed value.
    #[must_use]
    pub fn fail_with(
        description: impl Into<String>,
        actual: impl Into<String>,
        mismatch: impl Into<String>,
    ) -> Self {
        Self {
            actual: Some(actual.into()),
            ..Self::fail(description, mismatch)
        }
    }

    /// Returns the mismatch description when the check failed.
    #[must_use]
    pub fn failure_reason(&self) -> Option<&str> {
        self.mismatch.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_has_no_mismatch() {
        let outcome = CheckOutcome::pass_with("status = 200", "200");
        assert!(outcome.passed);
        assert_eq!(outcome.actual.as_deref(), Some("200"));
        assert_eq!(outcome.failure_reason(), None);
    }

    #[test]
    fn test_fail_carries_mismatch() {
        let outcome = CheckOutcome::fail_with("status = 200", "404", "expected status 200, got 404");
        assert!(!outcome.passed);
        assert_eq!(outcome.failure_reason(), Some("expected status 200, got 404"));
    }
}
