//! Runtime type tags for JSON values.
//!
//! Expectations describe response bodies and properties with a type name
//! (`"string"`, `"object"`, ...). This module maps JSON values onto a closed
//! set of tags and parses the names used in descriptors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// Closed set of type tags a JSON value can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ValueType {
    /// `null`
    Null,
    /// `true` / `false`
    Boolean,
    /// Any JSON number.
    Number,
    /// A JSON string.
    String,
    /// A JSON array.
    Array,
    /// A JSON object.
    Object,
}

impl ValueType {
    /// Classifies a JSON value.
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Returns the lowercase tag name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "null" => Ok(Self::Null),
            "boolean" | "bool" => Ok(Self::Boolean),
            "number" => Ok(Self::Number),
            "string" => Ok(Self::String),
            "array" => Ok(Self::Array),
            "object" => Ok(Self::Object),
            _ => Err(DomainError::UnknownTypeName(s.to_string())),
        }
    }
}

impl TryFrom<String> for ValueType {
    type Error = DomainError;

    fn try_from(value: String) -> DomainResult<Self> {
        value.parse()
    }
}

impl From<ValueType> for String {
    fn from(value: ValueType) -> Self {
        value.as_str().to_string()
    }
}

/// A type constraint from an expectation: a concrete tag or `any`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeExpectation {
    /// Accepts every value.
    #[default]
    Any,
    /// Accepts values of exactly this tag.
    Exact(ValueType),
}

impl TypeExpectation {
    /// Returns true if the value satisfies this constraint.
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(expected) => ValueType::of(value) == expected,
        }
    }
}

impl fmt::Display for TypeExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Exact(tag) => tag.fmt(f),
        }
    }
}

impl FromStr for TypeExpectation {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        if s.trim().eq_ignore_ascii_case("any") {
            Ok(Self::Any)
        } else {
            s.parse().map(Self::Exact)
        }
    }
}

impl TryFrom<String> for TypeExpectation {
    type Error = DomainError;

    fn try_from(value: String) -> DomainResult<Self> {
        value.parse()
    }
}

impl From<TypeExpectation> for String {
    fn from(value: TypeExpectation) -> Self {
        value.to_string()
    }
}
