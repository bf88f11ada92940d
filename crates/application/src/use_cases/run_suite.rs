//! Suite execution.
//!
//! Dispatches scenarios concurrently up to the configured worker bound
//! and reports results in declaration order regardless of completion
//! order. Scenarios share nothing but the read-only configuration, so no
//! locking is needed across them.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tracing::info;
use vigil_domain::{
    ErrorCause, RunReport, Scenario, ScenarioResult, ScenarioState, ScenarioStatus, Suite,
    SuiteConfig,
};

use super::run_scenario::run_scenario_with_retries;
use crate::error::RunResult;
use crate::ports::{CancellationToken, HttpClient};

/// Runs whole suites against an HTTP client adapter.
///
/// The runner aggregates results but never aborts a run on a scenario
/// failure; only cancellation cuts a run short, and even then results
/// that already reached a terminal state are preserved unchanged.
pub struct SuiteRunner<C> {
    client: Arc<C>,
    cancel: CancellationToken,
}

impl<C: HttpClient + 'static> SuiteRunner<C> {
    /// Creates a runner with a fresh cancellation token.
    #[must_use]
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            cancel: CancellationToken::new(),
        }
    }

    /// Creates a runner observing an externally owned token.
    #[must_use]
    pub const fn with_cancellation(client: Arc<C>, cancel: CancellationToken) -> Self {
        Self { client, cancel }
    }

    /// Returns a clone of the run's cancellation token, for wiring to an
    /// external signal such as Ctrl-C.
    #[must_use]
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Executes every scenario in the suite and returns the aggregated
    /// report, results re-sorted to declaration order.
    ///
    /// # Errors
    ///
    /// Returns an error only for an invalid suite; per-scenario failures
    /// are reported inside the run report.
    pub async fn run(&self, suite: &Suite, config: &SuiteConfig) -> RunResult<RunReport> {
        suite.validate()?;
        info!(
            suite = %suite.name,
            scenarios = suite.scenarios.len(),
            workers = config.workers().map_or(0, std::num::NonZeroUsize::get),
            "starting run"
        );

        let started = Instant::now();
        let config = Arc::new(config.clone());
        let semaphore = config
            .workers()
            .map(|workers| Arc::new(Semaphore::new(workers.get())));

        let mut handles = Vec::with_capacity(suite.scenarios.len());
        for scenario in &suite.scenarios {
            handles.push(tokio::spawn(run_one(
                Arc::clone(&self.client),
                Arc::clone(&config),
                self.cancel.clone(),
                semaphore.clone(),
                scenario.clone(),
            )));
        }

        // Joining in spawn order keeps the reported sequence aligned with
        // declaration order whatever the completion order was.
        let mut results = Vec::with_capacity(handles.len());
        for (scenario, handle) in suite.scenarios.iter().zip(handles) {
            let result = match handle.await {
                Ok(result) => result,
                Err(join_error) => ScenarioState::pending().finish(
                    scenario,
                    ScenarioStatus::Errored {
                        cause: ErrorCause::Transport,
                        message: format!("scenario task aborted: {join_error}"),
                    },
                    0,
                ),
            };
            results.push(result);
        }

        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let report = RunReport::new(
            suite.name.clone(),
            config.environment().map(str::to_string),
            results,
            duration_ms,
        );
        info!(
            suite = %suite.name,
            passed = report.passed,
            failed = report.failed,
            errored = report.errored,
            "run finished"
        );
        Ok(report)
    }
}

/// Runs one scenario to a terminal result, honoring the worker bound and
/// the cancellation token.
async fn run_one<C: HttpClient>(
    client: Arc<C>,
    config: Arc<SuiteConfig>,
    cancel: CancellationToken,
    semaphore: Option<Arc<Semaphore>>,
    scenario: Scenario,
) -> ScenarioResult {
    let pending = ScenarioState::pending();

    // Cancellation wins over a permit that frees up at the same moment:
    // a scenario that has not started must stay unstarted once the run is
    // cancelled.
    let _permit = if let Some(semaphore) = semaphore {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                return pending.finish(
                    &scenario,
                    ScenarioStatus::cancelled("run cancelled before scenario started"),
                    0,
                );
            }
            permit = semaphore.acquire_owned() => permit.ok(),
        }
    } else {
        None
    };

    if cancel.is_cancelled() {
        return pending.finish(
            &scenario,
            ScenarioStatus::cancelled("run cancelled before scenario started"),
            0,
        );
    }

    // Completed work wins over a simultaneous cancellation signal: a
    // result that reached a terminal state is preserved unchanged.
    let in_flight = pending.start();
    tokio::select! {
        biased;
        result = run_scenario_with_retries(client.as_ref(), &scenario, &config, config.retries()) => result,
        () = cancel.cancelled() => in_flight.finish(
            &scenario,
            ScenarioStatus::cancelled("run cancelled while scenario was in flight"),
            1,
        ),
    }
}
