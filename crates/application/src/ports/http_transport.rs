//! HTTP transport port

use async_trait::async_trait;
use thiserror::Error;

use sequent_domain::{PreparedRequest, TestResponse};

/// Errors a transport can raise.
///
/// A response with a non-2xx status is reported as [`TransportError::Status`]
/// and still carries the full response, so the runner can accept it when the
/// descriptor expects that status.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The server answered with a non-2xx status.
    #[error("server responded with status {}", .0.status_code())]
    Status(Box<TestResponse>),

    /// The request target could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The network stack gave up waiting.
    #[error("request timed out")]
    Timeout,

    /// The file to upload could not be read.
    #[error("failed to read upload {path}: {message}")]
    Upload {
        /// Path of the file.
        path: String,
        /// Underlying error.
        message: String,
    },

    /// Any other transport error.
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// The response carried by a status error.
    #[must_use]
    pub fn response(&self) -> Option<&TestResponse> {
        match self {
            Self::Status(response) => Some(response),
            _ => None,
        }
    }

    /// The status carried by a status error.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.response().map(|r| r.status)
    }
}

/// Port for dispatching prepared requests.
///
/// Implementations must return `Ok` only for 2xx responses and
/// [`TransportError::Status`] for every other received response.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends the request and returns the decoded response.
    ///
    /// # Errors
    /// Returns a [`TransportError`] for non-2xx responses and for network,
    /// URL or upload failures.
    async fn send(&self, request: &PreparedRequest) -> Result<TestResponse, TransportError>;
}
