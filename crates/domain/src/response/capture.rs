//! Response capture type
//!
//! A capture is produced once per executed request and read-only
//! afterwards; checks only ever observe it.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde_json::Value;

/// HTTP status code with semantic helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Creates a new `StatusCode`.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns true if this is a 2xx success status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Returns true if this is a 4xx client error status.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }

    /// Returns true if this is a 5xx server error status.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.0 >= 500 && self.0 < 600
    }

    /// Returns the canonical reason phrase for common status codes.
    #[must_use]
    pub const fn reason_phrase(&self) -> &'static str {
        match self.0 {
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            304 => "Not Modified",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            408 => "Request Timeout",
            409 => "Conflict",
            422 => "Unprocessable Entity",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, self.reason_phrase())
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// Everything observed from one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseCapture {
    /// HTTP status code.
    pub status: u16,
    /// Raw response headers.
    pub headers: HashMap<String, String>,
    /// Response body as text.
    pub body: String,
    /// Parsed body, present when the content type indicated JSON and the
    /// body parsed cleanly.
    pub json: Option<Value>,
    /// Observed round-trip duration.
    pub duration: Duration,
}

impl ResponseCapture {
    /// Builds a capture from raw response data.
    ///
    /// The body is parsed as JSON exactly once, here, when the
    /// Content-Type header indicates a JSON payload.
    #[must_use]
    pub fn new(
        status: impl Into<StatusCode>,
        headers: HashMap<String, String>,
        body: Vec<u8>,
        duration: Duration,
    ) -> Self {
        let status = status.into().as_u16();
        let body = String::from_utf8(body.clone())
            .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());

        let is_json = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .is_some_and(|(_, v)| v.contains("application/json") || v.contains("+json"));
        let json = if is_json {
            serde_json::from_str(&body).ok()
        } else {
            None
        };

        Self {
            status,
            headers,
            body,
            json,
            duration,
        }
    }

    /// Returns the status as a `StatusCode` struct.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        StatusCode::new(self.status)
    }

    /// Looks up a header value by case-insensitive name.
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the Content-Type header value, if present.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.get_header("content-type")
    }

    /// Returns the parsed JSON body, if any.
    #[must_use]
    pub const fn body_json(&self) -> Option<&Value> {
        self.json.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn json_headers() -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers
    }

    #[test]
    fn test_status_code_categories() {
        assert!(StatusCode::new(200).is_success());
        assert!(StatusCode::new(201).is_success());
        assert!(StatusCode::new(404).is_client_error());
        assert!(StatusCode::new(500).is_server_error());
        assert!(!StatusCode::new(200).is_client_error());
    }

    #[test]
    fn test_status_code_display() {
        assert_eq!(StatusCode::new(200).to_string(), "200 OK");
        assert_eq!(StatusCode::new(404).to_string(), "404 Not Found");
    }

    #[test]
    fn test_json_body_is_parsed_once() {
        let capture = ResponseCapture::new(
            200,
            json_headers(),
            br#"{"id": 1, "completed": false}"#.to_vec(),
            Duration::from_millis(20),
        );
        assert_eq!(capture.body_json(), Some(&json!({"id": 1, "completed": false})));
    }

    #[test]
    fn test_non_json_content_type_is_not_parsed() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "text/plain".to_string());
        let capture =
            ResponseCapture::new(200, headers, b"[1, 2, 3]".to_vec(), Duration::from_millis(5));
        assert_eq!(capture.body_json(), None);
        assert_eq!(capture.body, "[1, 2, 3]");
    }

    #[test]
    fn test_get_header_is_case_insensitive() {
        let capture =
            ResponseCapture::new(200, json_headers(), b"{}".to_vec(), Duration::from_millis(5));
        assert_eq!(capture.get_header("content-TYPE"), Some("application/json"));
        assert_eq!(capture.content_type(), Some("application/json"));
        assert_eq!(capture.get_header("X-Missing"), None);
    }

    #[test]
    fn test_unparseable_json_body_yields_no_value() {
        let capture = ResponseCapture::new(
            200,
            json_headers(),
            b"not json".to_vec(),
            Duration::from_millis(5),
        );
        assert_eq!(capture.body_json(), None);
        assert_eq!(capture.body, "not json");
    }
}
