//! Reporter port
//!
//! Receives progress events as the runner works through the descriptors.
//! Every method has an empty default so sinks only implement what they show.

use std::time::Duration;

use serde_json::Value;

use sequent_domain::{ContextStore, PreparedRequest, RunOutcome, TestFailure, TestResponse};

use crate::matcher::CheckReport;

/// Everything needed to diagnose a test: the request as sent, the context at
/// that moment and the last response seen.
#[derive(Debug, Clone, Copy)]
pub struct Diagnostics<'a> {
    /// The prepared request.
    pub request: &'a PreparedRequest,
    /// Context store contents.
    pub context: &'a ContextStore,
    /// Last response, if one was received.
    pub response: Option<&'a TestResponse>,
}

/// Which lifecycle hook an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStage {
    /// Setup before the first test.
    Before,
    /// Teardown after the run.
    After,
}

impl HookStage {
    /// Lowercase stage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

/// Sink for run progress.
#[allow(unused_variables)]
pub trait Reporter: Send + Sync {
    /// A run over `total` descriptors begins.
    fn run_started(&self, total: usize) {}

    /// A descriptor is about to be processed.
    fn test_started(&self, index: usize, title: &str) {}

    /// A descriptor was skipped.
    fn test_skipped(&self, index: usize, title: &str) {}

    /// One expectation check passed.
    fn check_passed(&self, check: &CheckReport) {}

    /// A variable was written to the context.
    fn variable_assigned(&self, name: &str, value: &Value) {}

    /// Every check of a descriptor passed.
    fn test_passed(&self, index: usize, title: &str, duration: Duration) {}

    /// A `debug` descriptor finished; dump what it sent and received.
    fn debug_dump(&self, diagnostics: &Diagnostics<'_>) {}

    /// A descriptor failed; dump everything useful for diagnosis.
    fn failure_dump(&self, diagnostics: &Diagnostics<'_>, failure: &TestFailure) {}

    /// A lifecycle hook failed.
    fn hook_failed(&self, stage: HookStage, message: &str) {}

    /// The run reached a terminal state.
    fn run_finished(&self, outcome: &RunOutcome) {}
}

/// Reporter that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {}
