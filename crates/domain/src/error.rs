//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while validating descriptors and their parts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A type name in an expectation is not one of the known tags.
    #[error("unknown type name: {0}")]
    UnknownTypeName(String),

    /// A variable extraction spec is malformed.
    #[error("invalid extraction spec '{spec}': {reason}")]
    InvalidExtractionSpec {
        /// The offending spec string.
        spec: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A descriptor or descriptor partial has an invalid structure.
    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(String),

    /// A descriptor extends a fragment that was never defined.
    #[error("unknown extension fragment: {0}")]
    UnknownFragment(String),

    /// The composed request target is not a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
