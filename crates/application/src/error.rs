//! Application error types

use thiserror::Error;
use vigil_domain::{ConfigError, DomainError};

/// Errors that abort a run before any scenario executes.
///
/// Per-scenario failures never surface here; they are reported inside
/// the run's results so one scenario can never abort another.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RunError {
    /// The suite configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The suite itself is invalid (duplicate scenario names, empty).
    #[error("invalid suite: {0}")]
    Suite(#[from] DomainError),
}

/// Result type alias for run-level operations.
pub type RunResult<T> = Result<T, RunError>;
