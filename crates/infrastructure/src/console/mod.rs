//! Terminal-facing adapters: the progress reporter and the breakpoint prompt.

mod prompt;
mod reporter;

pub use prompt::{AssumeYes, LinePrompt, StdinPrompt};
pub use reporter::ConsoleReporter;
