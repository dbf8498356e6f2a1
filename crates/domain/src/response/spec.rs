//! Response types
//!
//! Contains the response shape the matcher and extractor work on:
//! status code, decoded body, headers and timing.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP status code with semantic helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
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
            409 => "Conflict",
            422 => "Unprocessable Entity",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            _ => "Unknown",
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.0, self.reason_phrase())
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// A response as seen by expectation matching and variable extraction.
///
/// Header names are stored lowercased. The body is decoded as JSON when
/// possible, kept as a JSON string otherwise, and `null` when empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers keyed by lowercase name.
    pub headers: HashMap<String, String>,
    /// Decoded response body.
    pub body: Value,
    /// Wall-clock time between dispatch and the full body being read.
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

impl TestResponse {
    /// Creates a response from an already decoded body.
    #[must_use]
    pub fn new(
        status: impl Into<StatusCode>,
        headers: HashMap<String, String>,
        body: Value,
        duration: Duration,
    ) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();

        Self {
            status: status.into().as_u16(),
            headers,
            body,
            duration,
        }
    }

    /// Creates a response from raw body bytes, decoding them.
    #[must_use]
    pub fn from_raw(
        status: impl Into<StatusCode>,
        headers: HashMap<String, String>,
        body: &[u8],
        duration: Duration,
    ) -> Self {
        Self::new(status, headers, decode_body(body), duration)
    }

    /// Returns the status as a `StatusCode` struct.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        StatusCode::new(self.status)
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// Decodes a body: JSON if it parses, a string otherwise, `null` if empty.
#[must_use]
pub fn decode_body(body: &[u8]) -> Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }

    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

mod duration_millis {
    use serde::Serializer;
    use std::time::Duration;

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_status_code_display() {
        assert_eq!(StatusCode::new(201).to_string(), "201 Created");
        assert_eq!(StatusCode::new(404).to_string(), "404 Not Found");
        assert!(StatusCode::new(204).is_success());
        assert!(!StatusCode::new(404).is_success());
    }

    #[test]
    fn test_decode_json_body() {
        assert_eq!(decode_body(br#"{"id": 7}"#), json!({"id": 7}));
        assert_eq!(decode_body(b"[1,2]"), json!([1, 2]));
        assert_eq!(decode_body(b"42"), json!(42));
    }

    #[test]
    fn test_decode_text_and_empty_body() {
        assert_eq!(decode_body(b"Not Found"), json!("Not Found"));
        assert_eq!(decode_body(b""), Value::Null);
        assert_eq!(decode_body(b"  \n"), Value::Null);
    }

    #[test]
    fn test_headers_are_lowercased() {
        let mut headers = HashMap::new();
        headers.insert("X-Trace".to_string(), "abc".to_string());
        let response = TestResponse::new(200u16, headers, Value::Null, Duration::ZERO);

        assert_eq!(response.header("x-trace"), Some("abc"));
        assert_eq!(response.header("X-TRACE"), Some("abc"));
        assert!(response.headers.contains_key("x-trace"));
    }
}
