//! HTTP client port

use std::future::Future;

use thiserror::Error;
use vigil_domain::{ErrorCause, RequestPlan, ResponseCapture, SuiteConfig};

/// Errors an HTTP client adapter may surface for a single request.
///
/// Every variant is scoped to the owning scenario; none of them aborts
/// the rest of a run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecutorError {
    /// The resolved request URL is invalid.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    /// The request body could not be serialized.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// No response arrived within the per-request timeout.
    #[error("no response within {timeout_ms} ms")]
    Timeout {
        /// The timeout that elapsed, in milliseconds.
        timeout_ms: u64,
    },

    /// DNS resolution failed.
    #[error("DNS resolution failed for {host}: {message}")]
    Dns {
        /// Host that failed to resolve.
        host: String,
        /// Resolver diagnostic.
        message: String,
    },

    /// The server actively refused the connection.
    #[error("connection refused by {host}")]
    ConnectionRefused {
        /// Host that refused.
        host: String,
    },

    /// The connection could not be established or was torn down.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The redirect limit was exceeded.
    #[error("stopped after {max} redirects")]
    TooManyRedirects {
        /// The configured redirect limit.
        max: usize,
    },

    /// Any other transport-level failure.
    #[error("transport failure: {0}")]
    Other(String),
}

impl ExecutorError {
    /// Returns true if this error is a request timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Maps this error onto the reported error category.
    #[must_use]
    pub const fn cause(&self) -> ErrorCause {
        match self {
            Self::Timeout { .. } => ErrorCause::Timeout,
            _ => ErrorCause::Transport,
        }
    }
}

/// Port for executing a single HTTP request.
///
/// One request, one response: adapters must not retry, and retry policy
/// stays a runner concern. The adapter resolves the plan's path against
/// the configured base URL, merges default and per-request headers
/// (per-request wins), serializes the body as JSON and honors the
/// configured per-request timeout.
pub trait HttpClient: Send + Sync {
    /// Executes the plan against the configured base URL.
    fn execute(
        &self,
        plan: &RequestPlan,
        config: &SuiteConfig,
    ) -> impl Future<Output = Result<ResponseCapture, ExecutorError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_maps_to_timeout_cause() {
        let error = ExecutorError::Timeout { timeout_ms: 30_000 };
        assert!(error.is_timeout());
        assert_eq!(error.cause(), ErrorCause::Timeout);
    }

    #[test]
    fn test_connection_errors_map_to_transport_cause() {
        let refused = ExecutorError::ConnectionRefused {
            host: "localhost".to_string(),
        };
        assert_eq!(refused.cause(), ErrorCause::Transport);
        assert!(!refused.is_timeout());

        let dns = ExecutorError::Dns {
            host: "nowhere.invalid".to_string(),
            message: "not found".to_string(),
        };
        assert_eq!(dns.cause(), ErrorCause::Transport);
    }

    #[test]
    fn test_error_display() {
        let error = ExecutorError::Timeout { timeout_ms: 5_000 };
        assert_eq!(error.to_string(), "no response within 5000 ms");
    }
}
