//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A scenario name appears more than once within a suite.
    #[error("duplicate scenario name: {0}")]
    DuplicateScenario(String),

    /// The suite declares no scenarios at all.
    #[error("suite '{0}' declares no scenarios")]
    EmptySuite(String),

    /// The requested environment profile is not declared in the suite.
    #[error("unknown environment profile: {0}")]
    UnknownEnvironment(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
