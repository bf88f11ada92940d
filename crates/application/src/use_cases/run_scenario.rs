//! Single-scenario execution.

use tracing::{debug, warn};
use vigil_domain::{Scenario, ScenarioResult, ScenarioState, ScenarioStatus, SuiteConfig, contract};

use crate::ports::HttpClient;

/// Executes one scenario: one request, then fail-fast check evaluation.
///
/// The scenario is reported `Failed` on the first check mismatch and
/// `Errored` when the executor itself raised; either way the result is
/// scoped to this scenario alone.
pub async fn run_scenario<C: HttpClient>(
    client: &C,
    scenario: &Scenario,
    config: &SuiteConfig,
) -> ScenarioResult {
    run_attempt(client, scenario, config, 1).await
}

/// Re-runs a non-passing scenario wholesale, up to `retries` extra
/// attempts.
///
/// Each attempt is a fresh pass through the scenario state machine; the
/// last attempt's result is reported together with the attempt count.
pub async fn run_scenario_with_retries<C: HttpClient>(
    client: &C,
    scenario: &Scenario,
    config: &SuiteConfig,
    retries: u32,
) -> ScenarioResult {
    let mut attempt = 1;
    loop {
        let result = run_attempt(client, scenario, config, attempt).await;
        if result.status.is_passed() || attempt > retries {
            return result;
        }
        debug!(scenario = %scenario.name, attempt, "retrying after non-passing attempt");
        attempt += 1;
    }
}

async fn run_attempt<C: HttpClient>(
    client: &C,
    scenario: &Scenario,
    config: &SuiteConfig,
    attempt: u32,
) -> ScenarioResult {
    let state = ScenarioState::pending().start();
    debug!(
        scenario = %scenario.name,
        request = %scenario.request.request_line(),
        attempt,
        "dispatching request"
    );

    let status = match client.execute(&scenario.request, config).await {
        Ok(response) => {
            let outcomes = contract::verify(&scenario.checks, &response);
            outcomes
                .iter()
                .find_map(|outcome| outcome.failure_reason().map(str::to_string))
                .map_or(ScenarioStatus::Passed, |reason| ScenarioStatus::Failed {
                    reason,
                })
        }
        Err(error) => ScenarioStatus::Errored {
            cause: error.cause(),
            message: error.to_string(),
        },
    };

    if !status.is_passed() {
        warn!(scenario = %scenario.name, status = status.label(), "scenario did not pass");
    }
    state.finish(scenario, status, attempt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    use serde_json::json;
    use vigil_domain::{Check, ErrorCause, RequestPlan, ResponseCapture};

    use crate::ports::ExecutorError;

    /// Scripted executor: hands out one canned result per attempt.
    struct ScriptedClient {
        script: Mutex<Vec<Result<ResponseCapture, ExecutorError>>>,
    }

    impl ScriptedClient {
        fn new(script: Vec<Result<ResponseCapture, ExecutorError>>) -> Self {
            Self {
                script: Mutex::new(script),
            }
        }
    }

    impl HttpClient for ScriptedClient {
        async fn execute(
            &self,
            _plan: &RequestPlan,
            _config: &SuiteConfig,
        ) -> Result<ResponseCapture, ExecutorError> {
            let mut script = self.script.lock().unwrap();
            assert!(!script.is_empty(), "executor called more often than scripted");
            script.remove(0)
        }
    }

    fn json_response(status: u16, body: &str) -> ResponseCapture {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        ResponseCapture::new(status, headers, body.as_bytes().to_vec(), Duration::from_millis(3))
    }

    fn config() -> SuiteConfig {
        SuiteConfig::new("https://jsonplaceholder.typicode.com").unwrap()
    }

    fn create_scenario() -> Scenario {
        Scenario::new(
            "create todo",
            RequestPlan::post("/todos", json!({"title": "New Task", "completed": false})),
        )
        .with_check(Check::StatusEquals { expected: 201 })
        .with_check(Check::FieldEquals {
            name: "title".to_string(),
            expected: json!("New Task"),
        })
    }

    #[tokio::test]
    async fn test_passing_scenario() {
        let client = ScriptedClient::new(vec![Ok(json_response(
            201,
            r#"{"id": 201, "title": "New Task", "completed": false}"#,
        ))]);

        let result = run_scenario(&client, &create_scenario(), &config()).await;
        assert!(result.status.is_passed());
        assert_eq!(result.attempts, 1);
        assert_eq!(result.request, "POST /todos");
    }

    #[tokio::test]
    async fn test_check_mismatch_reports_failed() {
        let client = ScriptedClient::new(vec![Ok(json_response(
            500,
            r#"{"error": "boom"}"#,
        ))]);

        let result = run_scenario(&client, &create_scenario(), &config()).await;
        assert_eq!(
            result.status,
            ScenarioStatus::Failed {
                reason: "expected status = 201, got 500".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_executor_error_reports_errored() {
        let client = ScriptedClient::new(vec![Err(ExecutorError::Timeout { timeout_ms: 30_000 })]);

        let result = run_scenario(&client, &create_scenario(), &config()).await;
        assert_eq!(
            result.status,
            ScenarioStatus::Errored {
                cause: ErrorCause::Timeout,
                message: "no response within 30000 ms".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_retry_reruns_whole_scenario() {
        let client = ScriptedClient::new(vec![
            Err(ExecutorError::ConnectionFailed("reset by peer".to_string())),
            Ok(json_response(
                201,
                r#"{"id": 201, "title": "New Task", "completed": false}"#,
            )),
        ]);

        let result =
            run_scenario_with_retries(&client, &create_scenario(), &config(), 2).await;
        assert!(result.status.is_passed());
        assert_eq!(result.attempts, 2);
    }

    #[tokio::test]
    async fn test_retry_budget_exhausted_reports_last_attempt() {
        let client = ScriptedClient::new(vec![
            Ok(json_response(500, "{}")),
            Ok(json_response(500, "{}")),
        ]);

        let result =
            run_scenario_with_retries(&client, &create_scenario(), &config(), 1).await;
        assert!(result.status.is_failed());
        assert_eq!(result.attempts, 2);
    }
}
