//! Test descriptors.
//!
//! A [`TestDescriptor`] is one declarative test case: the request to send,
//! the expectation its response must meet and the variables to extract from
//! it. Field names follow the JSON/YAML suite format (`formData`,
//! `statusCode`, `break`, ...).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::expectation::Expectation;
use crate::extraction::ExtractionSpec;
use crate::request::HttpMethod;

/// Form field used for uploads when `file.form_name` is absent.
pub const DEFAULT_UPLOAD_FIELD: &str = "file";

fn default_upload_field() -> String {
    DEFAULT_UPLOAD_FIELD.to_string()
}

/// One declarative test case.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestDescriptor {
    /// Display name.
    #[serde(default)]
    pub title: String,

    /// HTTP method, `GET` when omitted.
    #[serde(default)]
    pub method: HttpMethod,

    /// Path relative to `baseUrl/basePath[/model]`; may embed `${var}`.
    #[serde(default)]
    pub url: String,

    /// Optional path segment inserted before `url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Request headers; string leaves may embed placeholders.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub headers: Map<String, Value>,

    /// JSON request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,

    /// URL-encoded form fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<Map<String, Value>>,

    /// Multipart form fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_data: Option<Map<String, Value>>,

    /// Query-string parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qs: Option<Map<String, Value>>,

    /// File to attach as a multipart part.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileUpload>,

    /// Response expectation.
    #[serde(default)]
    pub expect: Expectation,

    /// Extraction rules applied after the expectation passes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<ExtractionSpec>,

    /// Skip without executing.
    #[serde(default)]
    pub skip: bool,

    /// Pause for operator confirmation after this test.
    #[serde(default, rename = "break")]
    pub breakpoint: bool,

    /// Print request options and response for this test.
    #[serde(default)]
    pub debug: bool,

    /// Names of extension fragments merged under this descriptor.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,
}

impl TestDescriptor {
    /// Creates a `GET` descriptor expecting `200`.
    #[must_use]
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    /// Sets the method (builder pattern).
    #[must_use]
    pub const fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the expectation (builder pattern).
    #[must_use]
    pub fn with_expect(mut self, expect: Expectation) -> Self {
        self.expect = expect;
        self
    }

    /// Sets a header (builder pattern).
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets the JSON body (builder pattern).
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds an extraction rule (builder pattern).
    #[must_use]
    pub fn extracting(mut self, spec: ExtractionSpec) -> Self {
        self.variables.push(spec);
        self
    }

    /// Marks the descriptor as skipped (builder pattern).
    #[must_use]
    pub const fn skipped(mut self) -> Self {
        self.skip = true;
        self
    }

    /// Marks the descriptor as a breakpoint (builder pattern).
    #[must_use]
    pub const fn with_breakpoint(mut self) -> Self {
        self.breakpoint = true;
        self
    }
}

/// File upload attached to a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUpload {
    /// Path of the file; the upload is ignored when absent.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Form field the file is sent under.
    #[serde(default = "default_upload_field", alias = "formName")]
    pub form_name: String,
}

impl FileUpload {
    /// Creates an upload under the default form field.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            form_name: default_upload_field(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::value_type::ValueType;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_minimal_descriptor_defaults() {
        let descriptor: TestDescriptor = serde_json::from_value(json!({"url": "widgets"})).unwrap();
        assert_eq!(descriptor.method, HttpMethod::Get);
        assert_eq!(descriptor.expect.status_code, 200);
        assert!(descriptor.variables.is_empty());
        assert!(!descriptor.skip);
        assert!(!descriptor.breakpoint);
    }

    #[test]
    fn test_full_descriptor() {
        let descriptor: TestDescriptor = serde_json::from_value(json!({
            "title": "create widget",
            "method": "post",
            "model": "widgets",
            "url": "",
            "headers": {"Authorization": "Bearer ${token}"},
            "formData": {"kind": "gear"},
            "file": {"path": "fixtures/logo.png"},
            "expect": {"statusCode": 201, "bodyType": "object"},
            "variables": ["id", "owner.id:ownerId"],
            "break": true,
            "extends": ["auth"]
        }))
        .unwrap();

        assert_eq!(descriptor.method, HttpMethod::Post);
        assert_eq!(descriptor.model.as_deref(), Some("widgets"));
        assert_eq!(descriptor.form_data.unwrap()["kind"], json!("gear"));
        let file = descriptor.file.unwrap();
        assert_eq!(file.form_name, DEFAULT_UPLOAD_FIELD);
        assert_eq!(file.path, Some(PathBuf::from("fixtures/logo.png")));
        assert_eq!(descriptor.expect.body_type, Some(ValueType::Object));
        assert_eq!(descriptor.variables[1].target(), "ownerId");
        assert!(descriptor.breakpoint);
        assert_eq!(descriptor.extends, vec!["auth"]);
    }

    #[test]
    fn test_builder() {
        let descriptor = TestDescriptor::new("fetch", "widgets/${id}")
            .with_header("Accept", "application/json")
            .extracting(ExtractionSpec::new("id"))
            .with_breakpoint();
        assert_eq!(descriptor.headers["Accept"], json!("application/json"));
        assert_eq!(descriptor.variables.len(), 1);
        assert!(descriptor.breakpoint);
    }
}
