//! Suite configuration
//!
//! The immutable, validated settings every executor and runner operation
//! receives. Construction validates the base URL and timeout up front so
//! configuration problems surface before any scenario runs.

use std::num::NonZeroUsize;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::request::Headers;

/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Errors raised while constructing a [`SuiteConfig`].
///
/// These are fatal: they surface before any scenario runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL did not parse as an absolute URL.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The offending value.
        url: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The base URL parsed but is not an http(s) URL.
    #[error("base URL '{url}' has unsupported scheme '{scheme}' (expected http or https)")]
    UnsupportedScheme {
        /// The offending value.
        url: String,
        /// The scheme that was found.
        scheme: String,
    },

    /// The per-request timeout must be positive.
    #[error("per-request timeout must be positive")]
    NonPositiveTimeout,

    /// The worker count must be positive when given.
    #[error("worker count must be positive")]
    ZeroWorkers,
}

/// Immutable configuration shared by every scenario in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    base_url: Url,
    default_headers: Headers,
    timeout_ms: u64,
    workers: Option<NonZeroUsize>,
    retries: u32,
    environment: Option<String>,
}

impl SuiteConfig {
    /// Creates a configuration for the given absolute base URL, with a
    /// 30 second timeout, no default headers, unbounded concurrency and
    /// no retries.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or is not http(s).
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let parsed = Url::parse(base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme {
                url: base_url.to_string(),
                scheme: parsed.scheme().to_string(),
            });
        }

        Ok(Self {
            base_url: parsed,
            default_headers: Headers::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            workers: None,
            retries: 0,
            environment: None,
        })
    }

    /// Replaces the default headers.
    #[must_use]
    pub fn with_default_headers(mut self, headers: Headers) -> Self {
        self.default_headers = headers;
        self
    }

    /// Adds one default header.
    #[must_use]
    pub fn with_default_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.set(name, value);
        self
    }

    /// Sets the per-request timeout in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is zero.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Result<Self, ConfigError> {
        if timeout_ms == 0 {
            return Err(ConfigError::NonPositiveTimeout);
        }
        self.timeout_ms = timeout_ms;
        Ok(self)
    }

    /// Bounds the number of scenarios in flight at once.
    ///
    /// # Errors
    ///
    /// Returns an error if the count is zero; omit the call for
    /// unbounded concurrency.
    pub fn with_workers(mut self, workers: usize) -> Result<Self, ConfigError> {
        self.workers = Some(NonZeroUsize::new(workers).ok_or(ConfigError::ZeroWorkers)?);
        Ok(self)
    }

    /// Sets the number of extra whole-scenario attempts for scenarios
    /// that do not pass.
    #[must_use]
    pub const fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Records the environment label this configuration was resolved
    /// from, for reporting.
    #[must_use]
    pub fn with_environment(mut self, environment: Option<String>) -> Self {
        self.environment = environment;
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the default headers.
    #[must_use]
    pub const fn default_headers(&self) -> &Headers {
        &self.default_headers
    }

    /// Returns the per-request timeout in milliseconds.
    #[must_use]
    pub const fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Returns the per-request timeout as a duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Returns the concurrency bound, `None` meaning unbounded.
    #[must_use]
    pub const fn workers(&self) -> Option<NonZeroUsize> {
        self.workers
    }

    /// Returns the retry budget.
    #[must_use]
    pub const fn retries(&self) -> u32 {
        self.retries
    }

    /// Returns the environment label, when one was selected.
    #[must_use]
    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }
}
