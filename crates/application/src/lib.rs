//! Vigil Application - Use cases and ports
//!
//! This crate orchestrates scenario execution against the `HttpClient`
//! port. It owns the run lifecycle (dispatch, concurrency, cancellation,
//! retries, declaration-ordered reporting) while staying independent of
//! any concrete HTTP library.

pub mod error;
pub mod ports;
pub mod use_cases;

pub use error::{RunError, RunResult};
pub use ports::{CancellationToken, ExecutorError, HttpClient};
pub use use_cases::{SuiteRunner, run_scenario};
