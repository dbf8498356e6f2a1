//! Operator prompts.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};
use tokio::sync::Mutex;

use sequent_application::ports::{OperatorPrompt, PromptError};

/// Asks yes/no questions over a line-based reader and writer.
///
/// `y` and `yes` (any case) continue; every other answer stops. End of input
/// is reported as [`PromptError::Closed`].
pub struct LinePrompt<R, W> {
    io: Mutex<(R, W)>,
}

/// Prompt reading answers from the terminal.
pub type StdinPrompt = LinePrompt<BufReader<Stdin>, Stdout>;

impl StdinPrompt {
    /// Prompt bound to stdin and stdout.
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> LinePrompt<R, W> {
    /// Prompt over the given reader and writer.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            io: Mutex::new((reader, writer)),
        }
    }
}

#[async_trait]
impl<R, W> OperatorPrompt for LinePrompt<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn confirm(&self, question: &str) -> Result<bool, PromptError> {
        let mut io = self.io.lock().await;
        let (reader, writer) = &mut *io;

        writer.write_all(format!("{question} [y/N] ").as_bytes()).await?;
        writer.flush().await?;

        let mut answer = String::new();
        if reader.read_line(&mut answer).await? == 0 {
            return Err(PromptError::Closed);
        }

        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}

/// Prompt answering yes to every question, for unattended runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

#[async_trait]
impl OperatorPrompt for AssumeYes {
    async fn confirm(&self, question: &str) -> Result<bool, PromptError> {
        tracing::info!(question, "breakpoint confirmed automatically");
        Ok(true)
    }
}
