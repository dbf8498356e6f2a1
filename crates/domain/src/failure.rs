//! Per-test failure taxonomy.
//!
//! Every variant is fatal to the run: the first failing check stops the
//! current test and no later descriptor executes.

use serde_json::Value;
use thiserror::Error;

use crate::error::DomainError;
use crate::value_type::ValueType;

/// Why a single test failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TestFailure {
    /// The response status differs from `expect.statusCode`.
    #[error("invalid response statusCode: expected {expected} but got {actual}")]
    StatusMismatch {
        /// Declared status.
        expected: u16,
        /// Received status.
        actual: u16,
    },

    /// The body's type tag differs from `expect.bodyType`.
    #[error("invalid type for the response body: expected {expected} but detected {actual}")]
    BodyTypeMismatch {
        /// Declared tag.
        expected: ValueType,
        /// Tag of the received body.
        actual: ValueType,
    },

    /// A declared property path is absent from the body.
    #[error("missing body response key {path}")]
    MissingProperty {
        /// The dotted path.
        path: String,
    },

    /// A property exists with the wrong type.
    #[error("property {path} should be {expected} but was {actual}")]
    PropertyTypeMismatch {
        /// The dotted path.
        path: String,
        /// Declared tag.
        expected: ValueType,
        /// Tag of the received value.
        actual: ValueType,
    },

    /// A property exists with the wrong value.
    #[error("property {path} should equal {expected} but was {actual}")]
    PropertyValueMismatch {
        /// The dotted path.
        path: String,
        /// Declared value, after interpolation.
        expected: Value,
        /// Received value.
        actual: Value,
    },

    /// A declared header is absent from the response.
    #[error("header {name} is not present in the response headers")]
    MissingHeader {
        /// Header name, lowercased.
        name: String,
    },

    /// A header is present but lacks the expected substring.
    #[error("invalid value for header {name}: should contain {expected} but was {actual}")]
    HeaderMismatch {
        /// Header name, lowercased.
        name: String,
        /// Expected substring.
        expected: String,
        /// Received value.
        actual: String,
    },

    /// An extraction path is absent from the body.
    #[error("variable {path} is missing from the response body")]
    MissingExtractionPath {
        /// The dotted path.
        path: String,
    },

    /// The request took longer than `expect.duration`.
    #[error("request took {actual_ms}ms, expected at most {limit_ms}ms")]
    DurationExceeded {
        /// Declared ceiling.
        limit_ms: u64,
        /// Measured duration.
        actual_ms: u64,
    },

    /// The transport failed, or returned an unexpected non-2xx status.
    #[error("transport failure{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    TransportFailure {
        /// Status carried by the error, if a response was received.
        status: Option<u16>,
        /// Transport message.
        message: String,
    },

    /// The descriptor could not be turned into a request.
    #[error("configuration error: {0}")]
    Configuration(#[from] DomainError),
}

impl TestFailure {
    /// Short machine-friendly name of the failure kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::StatusMismatch { .. } => "StatusMismatch",
            Self::BodyTypeMismatch { .. } => "BodyTypeMismatch",
            Self::MissingProperty { .. } => "MissingProperty",
            Self::PropertyTypeMismatch { .. } => "PropertyTypeMismatch",
            Self::PropertyValueMismatch { .. } => "PropertyValueMismatch",
            Self::MissingHeader { .. } => "MissingHeader",
            Self::HeaderMismatch { .. } => "HeaderMismatch",
            Self::MissingExtractionPath { .. } => "MissingExtractionPath",
            Self::DurationExceeded { .. } => "DurationExceeded",
            Self::TransportFailure { .. } => "TransportFailure",
            Self::Configuration(_) => "ConfigurationError",
        }
    }
}
