//! Operator prompt port

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while asking the operator.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Reading the answer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input was closed before an answer arrived.
    #[error("input closed before an answer was given")]
    Closed,
}

/// Port for yes/no questions asked at breakpoints.
#[async_trait]
pub trait OperatorPrompt: Send + Sync {
    /// Asks the question and waits for the answer.
    ///
    /// # Errors
    /// Returns a [`PromptError`] when no answer can be read.
    async fn confirm(&self, question: &str) -> Result<bool, PromptError>;
}
