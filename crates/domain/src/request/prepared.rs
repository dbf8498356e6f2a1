//! Fully resolved request handed to the transport.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::HttpMethod;

/// Payload of a prepared request.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequestPayload {
    /// No body.
    #[default]
    None,
    /// JSON-encoded body.
    Json {
        /// The value to serialize.
        content: Value,
    },
    /// `application/x-www-form-urlencoded` fields.
    Form {
        /// Field pairs in declaration order.
        fields: Vec<(String, String)>,
    },
    /// `multipart/form-data` fields plus an optional file part.
    Multipart {
        /// Text fields in declaration order.
        fields: Vec<(String, String)>,
        /// File part merged into the form.
        #[serde(skip_serializing_if = "Option::is_none")]
        file: Option<FileAttachment>,
    },
}

/// A file attached to a multipart request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileAttachment {
    /// Form field the file is sent under.
    pub field_name: String,
    /// Path of the file on disk.
    pub path: PathBuf,
    /// File name sent with the part (the path's basename).
    pub file_name: String,
}

/// A request ready to be dispatched: placeholders resolved, target composed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute request target.
    pub url: String,
    /// Headers in declaration order.
    pub headers: IndexMap<String, String>,
    /// Query-string pairs appended to the target.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<(String, String)>,
    /// Request body.
    pub payload: RequestPayload,
}

impl PreparedRequest {
    /// Creates a request with no headers, query or body.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: IndexMap::new(),
            query: Vec::new(),
            payload: RequestPayload::None,
        }
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
