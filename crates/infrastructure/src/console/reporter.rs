//! Colored console reporter.
//!
//! Prints one block per test: a header, a success marker per passed check,
//! the variables written to the context and a pass line with the duration.
//! Failures and `debug` descriptors dump the request, the context and the
//! last response as pretty JSON.

use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

use sequent_application::CheckReport;
use sequent_application::ports::{Diagnostics, HookStage, Reporter};
use sequent_domain::{RunError, RunOutcome, TestFailure};

const SEPARATOR: &str = "------------------------------------------------";

/// Reporter writing human-readable progress to a terminal (or any writer).
pub struct ConsoleReporter {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleReporter {
    /// Reporter writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Reporter writing to the given sink.
    #[must_use]
    pub fn with_writer(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
        }
    }

    fn emit(&self, text: &str) {
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{text}");
            let _ = out.flush();
        }
    }

    fn dump(&self, diagnostics: &Diagnostics<'_>) {
        self.emit(&format!("--> Request options :\n{}", pretty(diagnostics.request).dimmed()));
        self.emit(&format!("--> Context :\n{}", pretty(diagnostics.context).dimmed()));
        match diagnostics.response {
            Some(response) => {
                self.emit(&format!("--> Body :\n{}", pretty(&response.body).dimmed()));
                self.emit(&format!("--> Headers :\n{}", pretty(&response.headers).dimmed()));
            }
            None => self.emit(&"--> No response received".dimmed().to_string()),
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Reporter for ConsoleReporter {
    fn run_started(&self, total: usize) {
        self.emit(&format!("Running {} tests", total.to_string().bold()));
    }

    fn test_started(&self, index: usize, title: &str) {
        self.emit(SEPARATOR);
        self.emit(&format!(
            "\nRun test [{}] - {}",
            index.to_string().yellow(),
            title.yellow()
        ));
    }

    fn test_skipped(&self, _index: usize, _title: &str) {
        self.emit(&"Test skipped...".cyan().to_string());
    }

    fn check_passed(&self, check: &CheckReport) {
        self.emit(&format!("    {}", check_line(check)));
    }

    fn variable_assigned(&self, name: &str, value: &Value) {
        self.emit(&format!(
            "    variable {} = {}",
            name.cyan(),
            value.to_string().green()
        ));
    }

    fn test_passed(&self, _index: usize, title: &str, duration: Duration) {
        self.emit(&format!(
            "  {} {} ({}ms)",
            "✓".green(),
            title.green(),
            duration.as_millis()
        ));
    }

    fn debug_dump(&self, diagnostics: &Diagnostics<'_>) {
        self.emit(&"[DEBUG ON]".magenta().bold().to_string());
        self.dump(diagnostics);
    }

    fn failure_dump(&self, diagnostics: &Diagnostics<'_>, failure: &TestFailure) {
        self.emit(&format!(
            "  {} {}",
            "✗".red(),
            failure.to_string().red().bold()
        ));
        self.dump(diagnostics);
    }

    fn hook_failed(&self, stage: HookStage, message: &str) {
        self.emit(&format!(
            "{} hook failed: {}",
            stage.as_str().yellow(),
            message.red()
        ));
    }

    fn run_finished(&self, outcome: &RunOutcome) {
        let summary = outcome.summary();
        self.emit(SEPARATOR);
        self.emit(&format!(
            "{} passed, {} skipped, {} failed in {}ms",
            summary.passed(),
            summary.skipped(),
            summary.failed(),
            summary.total_duration().as_millis()
        ));

        let verdict = match outcome {
            RunOutcome::Completed(_) => "All tests successfully passed!".green().bold(),
            RunOutcome::Aborted { after, .. } => {
                format!("Run aborted by the operator after test [{after}]").yellow()
            }
            RunOutcome::Failed {
                error: RunError::Test { index, title, .. },
                ..
            } => format!("Test [{index}] {title} failed").red().bold(),
            RunOutcome::Failed { error, .. } => error.to_string().red().bold(),
        };
        self.emit(&format!("\n{verdict}"));
    }
}

fn check_line(check: &CheckReport) -> String {
    match check {
        CheckReport::Status(code) => format!("statusCode = {}", code.to_string().green()),
        CheckReport::BodyType(tag) => format!("bodyType = {}", tag.as_str().green()),
        CheckReport::Property { path, kind, value } => match value {
            Some(value) => format!(
                "property {} = {} ({})",
                path.cyan(),
                kind.to_string().green(),
                value.to_string().green()
            ),
            None => format!("property {} = {}", path.cyan(), kind.to_string().green()),
        },
        CheckReport::Header { name, expected } => {
            format!("header {} contains {}", name.cyan(), expected.green())
        }
        CheckReport::Duration {
            limit_ms,
            actual_ms,
        } => format!(
            "duration {} <= {limit_ms}ms",
            format!("{actual_ms}ms").green()
        ),
    }
}

fn pretty(value: &impl Serialize) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("<unserializable: {e}>"))
}
