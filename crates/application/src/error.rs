//! Application error types

use thiserror::Error;
use sequent_domain::DomainError;

/// Application-level errors raised outside of test execution
/// (registration, session wiring).
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A descriptor or partial is malformed.
    #[error("configuration error: {0}")]
    Configuration(#[from] DomainError),

    /// The runner was driven out of order (e.g. `advance` while awaiting
    /// confirmation).
    #[error("invalid runner transition: {0}")]
    InvalidTransition(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
