//! Expectation matcher.
//!
//! Verifies a response against a descriptor's [`Expectation`]. Checks run in a
//! fixed order (status, body type, properties, headers, duration) and the
//! first violation is returned as the test's failure.

use std::fmt;

use serde_json::Value;
use tracing::{debug, warn};

use sequent_domain::expectation::PropertySpec;
use sequent_domain::path;
use sequent_domain::{
    ContextStore, Expectation, TestFailure, TestResponse, TypeExpectation, ValueType,
};

use crate::interpolation::interpolate;

/// A passed check, reported as a success marker.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckReport {
    /// Status code matched.
    Status(u16),
    /// Body type matched.
    BodyType(ValueType),
    /// Property exists with the expected type (and value, if declared).
    Property {
        /// Dotted path.
        path: String,
        /// Type constraint that was checked.
        kind: TypeExpectation,
        /// Value that was compared, after interpolation.
        value: Option<Value>,
    },
    /// Header exists and contains the expected text.
    Header {
        /// Lowercase header name.
        name: String,
        /// Expected substring.
        expected: String,
    },
    /// Request finished within the ceiling.
    Duration {
        /// Declared ceiling.
        limit_ms: u64,
        /// Measured duration.
        actual_ms: u64,
    },
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(code) => write!(f, "statusCode = {code}"),
            Self::BodyType(tag) => write!(f, "bodyType = {tag}"),
            Self::Property {
                path,
                kind,
                value: Some(value),
            } => write!(f, "property {path} = {kind} ({value})"),
            Self::Property { path, kind, .. } => write!(f, "property {path} = {kind}"),
            Self::Header { name, expected } => write!(f, "header {name} contains {expected}"),
            Self::Duration {
                limit_ms,
                actual_ms,
            } => write!(f, "duration {actual_ms}ms <= {limit_ms}ms"),
        }
    }
}

/// Matches responses against expectations.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExpectationMatcher;

impl ExpectationMatcher {
    /// Create a new matcher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Runs every applicable check and returns the passed ones.
    ///
    /// # Errors
    /// Returns the first violated check as a [`TestFailure`].
    pub fn check(
        &self,
        response: &TestResponse,
        expect: &Expectation,
        context: &ContextStore,
    ) -> Result<Vec<CheckReport>, TestFailure> {
        let mut reports = vec![self.check_status(response, expect)?];

        if let Some(expected) = expect.body_type {
            reports.push(self.check_body_type(response, expected)?);
        }

        if let Some(properties) = &expect.properties {
            if ValueType::of(&response.body) == ValueType::Object {
                for (property, spec) in properties {
                    reports.push(self.check_property(&response.body, property, spec, context)?);
                }
            } else {
                warn!(
                    body_type = %ValueType::of(&response.body),
                    "property expectations ignored: response body is not an object"
                );
            }
        }

        if let Some(headers) = &expect.headers {
            for (name, expected) in headers {
                reports.push(self.check_header(response, name, expected)?);
            }
        }

        if let Some(limit_ms) = expect.duration {
            reports.push(self.check_duration(response, limit_ms)?);
        }

        debug!(checks = reports.len(), "expectation satisfied");
        Ok(reports)
    }

    fn check_status(
        &self,
        response: &TestResponse,
        expect: &Expectation,
    ) -> Result<CheckReport, TestFailure> {
        if response.status == expect.status_code {
            Ok(CheckReport::Status(response.status))
        } else {
            Err(TestFailure::StatusMismatch {
                expected: expect.status_code,
                actual: response.status,
            })
        }
    }

    fn check_body_type(
        &self,
        response: &TestResponse,
        expected: ValueType,
    ) -> Result<CheckReport, TestFailure> {
        let actual = ValueType::of(&response.body);
        if actual == expected {
            Ok(CheckReport::BodyType(actual))
        } else {
            Err(TestFailure::BodyTypeMismatch { expected, actual })
        }
    }

    fn check_property(
        &self,
        body: &Value,
        property: &str,
        spec: &PropertySpec,
        context: &ContextStore,
    ) -> Result<CheckReport, TestFailure> {
        let actual = path::lookup(body, property).ok_or_else(|| TestFailure::MissingProperty {
            path: property.to_string(),
        })?;

        let kind = spec.kind();
        if let TypeExpectation::Exact(expected) = kind {
            let actual_type = ValueType::of(actual);
            if actual_type != expected {
                return Err(TestFailure::PropertyTypeMismatch {
                    path: property.to_string(),
                    expected,
                    actual: actual_type,
                });
            }
        }

        let value = spec.value().map(|expected| match expected {
            Value::String(template) => Value::String(interpolate(template, context)),
            other => other.clone(),
        });

        if let Some(expected) = &value
            && !json_eq(expected, actual)
        {
            return Err(TestFailure::PropertyValueMismatch {
                path: property.to_string(),
                expected: expected.clone(),
                actual: actual.clone(),
            });
        }

        Ok(CheckReport::Property {
            path: property.to_string(),
            kind,
            value,
        })
    }

    fn check_header(
        &self,
        response: &TestResponse,
        name: &str,
        expected: &str,
    ) -> Result<CheckReport, TestFailure> {
        let name = name.to_ascii_lowercase();
        let actual = response
            .header(&name)
            .ok_or_else(|| TestFailure::MissingHeader { name: name.clone() })?;

        if actual.contains(expected) {
            Ok(CheckReport::Header {
                name,
                expected: expected.to_string(),
            })
        } else {
            Err(TestFailure::HeaderMismatch {
                name,
                expected: expected.to_string(),
                actual: actual.to_string(),
            })
        }
    }

    fn check_duration(
        &self,
        response: &TestResponse,
        limit_ms: u64,
    ) -> Result<CheckReport, TestFailure> {
        let actual_ms = u64::try_from(response.duration.as_millis()).unwrap_or(u64::MAX);
        if actual_ms <= limit_ms {
            Ok(CheckReport::Duration {
                limit_ms,
                actual_ms,
            })
        } else {
            Err(TestFailure::DurationExceeded {
                limit_ms,
                actual_ms,
            })
        }
    }
}

/// Deep equality where numbers compare by value, so `2` equals `2.0`.
#[allow(clippy::float_cmp)]
fn json_eq(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
                a == b
            } else if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
                a == b
            } else {
                a.as_f64() == b.as_f64()
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| json_eq(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| json_eq(x, y)))
        }
        _ => expected == actual,
    }
}

/// Matches a response against an expectation with a default matcher.
///
/// # Errors
/// Returns the first violated check as a [`TestFailure`].
pub fn match_response(
    response: &TestResponse,
    expect: &Expectation,
    context: &ContextStore,
) -> Result<Vec<CheckReport>, TestFailure> {
    ExpectationMatcher::new().check(response, expect, context)
}
