//! Harness use cases (run orchestration).

mod run_scenario;
mod run_suite;

pub use run_scenario::{run_scenario, run_scenario_with_retries};
pub use run_suite::SuiteRunner;
