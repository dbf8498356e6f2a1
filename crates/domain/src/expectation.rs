//! Response expectations.
//!
//! An [`Expectation`] describes what a descriptor's response must look like:
//! status code, body type, typed (and optionally valued) properties, header
//! substrings and a duration ceiling.

use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value_type::{TypeExpectation, ValueType};

/// Status code assumed when a descriptor does not declare one.
pub const DEFAULT_STATUS_CODE: u16 = 200;

const fn default_status_code() -> u16 {
    DEFAULT_STATUS_CODE
}

/// What a response must satisfy for its test to pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expectation {
    /// Expected HTTP status code.
    #[serde(default = "default_status_code")]
    pub status_code: u16,

    /// Expected type tag of the whole body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_type: Option<ValueType>,

    /// Property path to spec, checked only when the body is an object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, PropertySpec>>,

    /// Header name to expected substring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<IndexMap<String, String>>,

    /// Maximum request duration in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
}

impl Default for Expectation {
    fn default() -> Self {
        Self {
            status_code: DEFAULT_STATUS_CODE,
            body_type: None,
            properties: None,
            headers: None,
            duration: None,
        }
    }
}

impl Expectation {
    /// Creates an expectation for the given status code.
    #[must_use]
    pub fn status(code: u16) -> Self {
        Self {
            status_code: code,
            ..Self::default()
        }
    }

    /// Sets the expected body type (builder pattern).
    #[must_use]
    pub fn with_body_type(mut self, body_type: ValueType) -> Self {
        self.body_type = Some(body_type);
        self
    }

    /// Adds a property spec (builder pattern).
    #[must_use]
    pub fn with_property(mut self, path: impl Into<String>, spec: PropertySpec) -> Self {
        self.properties
            .get_or_insert_with(IndexMap::new)
            .insert(path.into(), spec);
        self
    }

    /// Adds a header substring expectation (builder pattern).
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, contains: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), contains.into());
        self
    }

    /// Sets the duration ceiling (builder pattern).
    #[must_use]
    pub fn within(mut self, max: Duration) -> Self {
        self.duration = Some(u64::try_from(max.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Returns the duration ceiling, if any.
    #[must_use]
    pub fn max_duration(&self) -> Option<Duration> {
        self.duration.map(Duration::from_millis)
    }
}

/// Expectation for a single body property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertySpec {
    /// A bare type name such as `"string"` or `"any"`.
    Type(TypeExpectation),
    /// A type plus an optional exact value.
    Detailed {
        /// Required type; `any` when omitted.
        #[serde(rename = "type", default)]
        kind: TypeExpectation,
        /// Value the property must deep-equal. String values are interpolated
        /// against the run context before comparison.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Value>,
    },
}

impl PropertySpec {
    /// Spec that only constrains the type.
    #[must_use]
    pub const fn of_type(tag: ValueType) -> Self {
        Self::Type(TypeExpectation::Exact(tag))
    }

    /// Spec that accepts any value.
    #[must_use]
    pub const fn any() -> Self {
        Self::Type(TypeExpectation::Any)
    }

    /// Spec that constrains both type and value.
    #[must_use]
    pub const fn equals(kind: TypeExpectation, value: Value) -> Self {
        Self::Detailed {
            kind,
            value: Some(value),
        }
    }

    /// The type constraint.
    #[must_use]
    pub const fn kind(&self) -> TypeExpectation {
        match self {
            Self::Type(kind) | Self::Detailed { kind, .. } => *kind,
        }
    }

    /// The expected value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Type(_) => None,
            Self::Detailed { value, .. } => value.as_ref(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_status_defaults_to_200() {
        let expect: Expectation = serde_json::from_value(json!({})).unwrap();
        assert_eq!(expect.status_code, 200);
        assert_eq!(Expectation::default().status_code, 200);

        let expect: Expectation = serde_json::from_value(json!({"bodyType": "array"})).unwrap();
        assert_eq!(expect.status_code, 200);
        assert_eq!(expect.body_type, Some(ValueType::Array));
    }

    #[test]
    fn test_property_spec_forms() {
        let expect: Expectation = serde_json::from_value(json!({
            "statusCode": 201,
            "properties": {
                "name": "string",
                "meta": "ANY",
                "id": {"type": "number", "value": 7},
                "owner": {"value": "${user}"}
            }
        }))
        .unwrap();

        let props = expect.properties.unwrap();
        assert_eq!(props["name"], PropertySpec::of_type(ValueType::String));
        assert_eq!(props["meta"], PropertySpec::any());
        assert_eq!(
            props["id"],
            PropertySpec::equals(TypeExpectation::Exact(ValueType::Number), json!(7))
        );
        assert_eq!(props["owner"].kind(), TypeExpectation::Any);
        assert_eq!(props["owner"].value(), Some(&json!("${user}")));
    }

    #[test]
    fn test_properties_keep_declaration_order() {
        let expect: Expectation = serde_json::from_value(json!({
            "properties": {"z": "any", "a": "any", "m": "any"}
        }))
        .unwrap();
        let keys: Vec<_> = expect.properties.unwrap().into_keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_unknown_type_name_is_rejected() {
        let result = serde_json::from_value::<Expectation>(json!({
            "properties": {"name": "text"}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_builder() {
        let expect = Expectation::status(404)
            .with_header("x-trace", "abc")
            .within(Duration::from_millis(250));
        assert_eq!(expect.status_code, 404);
        assert_eq!(expect.max_duration(), Some(Duration::from_millis(250)));
        assert_eq!(expect.headers.unwrap()["x-trace"], "abc");
    }
}
