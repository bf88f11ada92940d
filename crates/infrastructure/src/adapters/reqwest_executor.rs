//! HTTP executor adapter built on reqwest.
//!
//! Implements the `HttpClient` port: one request, one response, with the
//! per-request timeout taken from the suite configuration. Retry policy
//! stays with the runner.

use std::collections::HashMap;
use std::time::Instant;

use reqwest::{Client, Method};
use tracing::debug;
use url::Url;
use vigil_application::ports::{ExecutorError, HttpClient};
use vigil_domain::{HttpMethod, RequestPlan, ResponseCapture, SuiteConfig};

/// Redirect limit applied to every request.
const MAX_REDIRECTS: usize = 10;

/// HTTP client adapter wrapping `reqwest::Client`.
pub struct ReqwestExecutor {
    client: Client,
}

impl ReqwestExecutor {
    /// Creates an executor with the harness defaults: rustls TLS, a
    /// redirect limit of 10 and a vigil User-Agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be constructed.
    pub fn new() -> Result<Self, ExecutorError> {
        let client = Client::builder()
            .user_agent(concat!("vigil/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| ExecutorError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates an executor over a caller-provided reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Converts the domain method to a reqwest method.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Resolves a plan path against the configured base URL.
    fn resolve_url(base: &Url, path: &str) -> Result<Url, ExecutorError> {
        base.join(path)
            .map_err(|e| ExecutorError::InvalidUrl(format!("{e}: {path}")))
    }

    /// Maps reqwest errors onto the executor error taxonomy.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> ExecutorError {
        if error.is_timeout() {
            return ExecutorError::Timeout { timeout_ms };
        }

        if error.is_connect() {
            let message = error.to_string();
            let host = error
                .url()
                .and_then(Url::host_str)
                .unwrap_or("unknown")
                .to_string();
            let lowered = message.to_lowercase();
            if lowered.contains("dns") || lowered.contains("resolve") {
                return ExecutorError::Dns { host, message };
            }
            if lowered.contains("refused") {
                return ExecutorError::ConnectionRefused { host };
            }
            return ExecutorError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return ExecutorError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        ExecutorError::Other(error.to_string())
    }
}

impl HttpClient for ReqwestExecutor {
    async fn execute(
        &self,
        plan: &RequestPlan,
        config: &SuiteConfig,
    ) -> Result<ResponseCapture, ExecutorError> {
        let url = Self::resolve_url(config.base_url(), &plan.path)?;
        let headers = config.default_headers().overridden_by(&plan.headers);
        debug!(method = %plan.method, url = %url, "sending request");

        let start = Instant::now();
        let mut builder = self
            .client
            .request(Self::to_reqwest_method(plan.method), url)
            .timeout(config.timeout());

        for header in headers.all() {
            builder = builder.header(&header.name, &header.value);
        }

        if let Some(body) = &plan.body {
            if !headers.contains("content-type") {
                builder = builder.header("Content-Type", "application/json");
            }
            let serialized =
                serde_json::to_string(body).map_err(|e| ExecutorError::InvalidBody(e.to_string()))?;
            builder = builder.body(serialized);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, config.timeout_ms()))?;

        let status = response.status().as_u16();
        let response_headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| ExecutorError::Other(format!("failed to read body: {e}")))?
            .to_vec();

        Ok(ResponseCapture::new(
            status,
            response_headers,
            body,
            start.elapsed(),
        ))
    }
}
