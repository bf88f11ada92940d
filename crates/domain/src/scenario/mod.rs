//! Scenario and suite domain types

mod report;
mod state;

pub use report::{RunReport, ScenarioResult};
pub use state::{ErrorCause, ScenarioState, ScenarioStatus};

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::contract::Check;
use crate::error::{DomainError, DomainResult};
use crate::request::{Headers, RequestPlan};

/// One declared request plus its expected-outcome checks.
///
/// Scenarios are self-contained: none may depend on mutations performed
/// by another scenario's request, which is what allows the runner to
/// dispatch them concurrently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Name, unique within a suite.
    pub name: String,
    /// The request to issue.
    pub request: RequestPlan,
    /// Checks applied to the response, in declared order.
    #[serde(default)]
    pub checks: Vec<Check>,
}

impl Scenario {
    /// Creates a scenario with no checks yet.
    #[must_use]
    pub fn new(name: impl Into<String>, request: RequestPlan) -> Self {
        Self {
            name: name.into(),
            request,
            checks: Vec::new(),
        }
    }

    /// Adds a check (builder pattern).
    #[must_use]
    pub fn with_check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }
}

/// Named per-deployment connection profile (e.g. dev vs. staging).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentProfile {
    /// Absolute base URL scenarios resolve their paths against.
    pub base_url: String,
    /// Default headers applied to every request in this environment.
    #[serde(default)]
    pub headers: Headers,
}

/// A declared suite: named scenarios plus optional environment profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suite {
    /// Suite name, used in reports.
    pub name: String,
    /// Environment profiles selectable by label at run time.
    #[serde(default)]
    pub environments: BTreeMap<String, EnvironmentProfile>,
    /// Scenarios in declaration order; reports preserve this order.
    pub scenarios: Vec<Scenario>,
}

impl Suite {
    /// Creates a suite from a scenario list.
    #[must_use]
    pub fn new(name: impl Into<String>, scenarios: Vec<Scenario>) -> Self {
        Self {
            name: name.into(),
            environments: BTreeMap::new(),
            scenarios,
        }
    }

    /// Validates the suite before a run.
    ///
    /// # Errors
    ///
    /// Returns an error if the suite is empty or declares two scenarios
    /// with the same name.
    pub fn validate(&self) -> DomainResult<()> {
        if self.scenarios.is_empty() {
            return Err(DomainError::EmptySuite(self.name.clone()));
        }
        let mut seen = BTreeSet::new();
        for scenario in &self.scenarios {
            if !seen.insert(scenario.name.as_str()) {
                return Err(DomainError::DuplicateScenario(scenario.name.clone()));
            }
        }
        Ok(())
    }

    /// Looks up an environment profile by label.
    ///
    /// # Errors
    ///
    /// Returns an error if no profile with that label is declared.
    pub fn environment(&self, label: &str) -> DomainResult<&EnvironmentProfile> {
        self.environments
            .get(label)
            .ok_or_else(|| DomainError::UnknownEnvironment(label.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestPlan;
    use pretty_assertions::assert_eq;

    fn scenario(name: &str) -> Scenario {
        Scenario::new(name, RequestPlan::get("/todos"))
    }

    #[test]
    fn test_validate_accepts_unique_names() {
        let suite = Suite::new("todo-api", vec![scenario("a"), scenario("b")]);
        assert!(suite.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let suite = Suite::new("todo-api", vec![scenario("a"), scenario("a")]);
        assert_eq!(
            suite.validate(),
            Err(DomainError::DuplicateScenario("a".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_empty_suite() {
        let suite = Suite::new("todo-api", Vec::new());
        assert_eq!(
            suite.validate(),
            Err(DomainError::EmptySuite("todo-api".to_string()))
        );
    }

    #[test]
    fn test_environment_lookup() {
        let mut suite = Suite::new("todo-api", vec![scenario("a")]);
        suite.environments.insert(
            "dev".to_string(),
            EnvironmentProfile {
                base_url: "https://dev.example.com".to_string(),
                headers: Headers::new(),
            },
        );

        assert!(suite.environment("dev").is_ok());
        assert_eq!(
            suite.environment("prod").err(),
            Some(DomainError::UnknownEnvironment("prod".to_string()))
        );
    }

    #[test]
    fn test_suite_deserializes_from_document() {
        let suite: Suite = serde_json::from_str(
            r#"{
                "name": "todo-api",
                "environments": {
                    "dev": {"base_url": "https://jsonplaceholder.typicode.com"}
                },
                "scenarios": [
                    {
                        "name": "list todos",
                        "request": {"method": "GET", "path": "/todos"},
                        "checks": [{"type": "status_equals", "expected": 200}]
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(suite.name, "todo-api");
        assert_eq!(suite.scenarios.len(), 1);
        assert_eq!(suite.scenarios[0].checks.len(), 1);
        assert!(suite.environments.contains_key("dev"));
    }
}
