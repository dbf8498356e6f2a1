//! Run state machine and outcome types.
//!
//! A run moves `Idle → Running`, may pause in `AwaitingConfirmation` after a
//! breakpoint, and ends in exactly one of `Completed`, `Aborted` or `Failed`.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::failure::TestFailure;

/// Current state of a test run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RunState {
    /// Nothing has executed yet.
    #[default]
    Idle,
    /// Descriptors are being executed.
    Running,
    /// A breakpoint was hit; the run needs an operator decision to go on.
    AwaitingConfirmation {
        /// Index of the descriptor that carried the breakpoint.
        index: usize,
    },
    /// Every descriptor was processed.
    Completed,
    /// The operator stopped the run at a breakpoint.
    Aborted,
    /// A test failed; nothing after it executed.
    Failed,
}

impl RunState {
    /// Returns true for `Completed`, `Aborted` and `Failed`.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Aborted | Self::Failed)
    }
}

/// How a single descriptor ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    /// All checks passed.
    Passed,
    /// Marked `skip`; not executed.
    Skipped,
    /// A check or the transport failed.
    Failed,
}

/// Record of one processed descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestRecord {
    /// Position in registration order.
    pub index: usize,
    /// Descriptor title.
    pub title: String,
    /// Outcome.
    pub status: TestStatus,
    /// When the request was dispatched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    /// Measured request duration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Duration>,
}

impl TestRecord {
    /// Record for a skipped descriptor.
    #[must_use]
    pub fn skipped(index: usize, title: impl Into<String>) -> Self {
        Self {
            index,
            title: title.into(),
            status: TestStatus::Skipped,
            started_at: None,
            duration: None,
        }
    }
}

/// Per-test records accumulated during a run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RunSummary {
    /// Records in execution order.
    pub records: Vec<TestRecord>,
}

impl RunSummary {
    /// Number of passed tests.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.count(TestStatus::Passed)
    }

    /// Number of skipped tests.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(TestStatus::Skipped)
    }

    /// Number of failed tests (zero or one).
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(TestStatus::Failed)
    }

    /// Sum of measured request durations.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.records.iter().filter_map(|r| r.duration).sum()
    }

    fn count(&self, status: TestStatus) -> usize {
        self.records.iter().filter(|r| r.status == status).count()
    }
}

/// Fatal error that ended a run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RunError {
    /// A descriptor failed.
    #[error("test [{index}] {title} failed: {failure}")]
    Test {
        /// Position in registration order.
        index: usize,
        /// Descriptor title.
        title: String,
        /// What went wrong.
        failure: TestFailure,
    },

    /// The host never became ready.
    #[error("host unavailable: {0}")]
    HostUnavailable(String),
}

/// Terminal result of a run, delivered to the host exactly once.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Every descriptor was processed without a fatal error.
    Completed(RunSummary),
    /// The operator declined to continue at a breakpoint.
    Aborted {
        /// Records up to and including the breakpoint test.
        summary: RunSummary,
        /// Index of the breakpoint descriptor.
        after: usize,
    },
    /// The first fatal error.
    Failed {
        /// Records up to and including the failing test.
        summary: RunSummary,
        /// The error.
        error: RunError,
    },
}

impl RunOutcome {
    /// Completed and aborted runs both count as success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }

    /// The accumulated summary.
    #[must_use]
    pub const fn summary(&self) -> &RunSummary {
        match self {
            Self::Completed(summary)
            | Self::Aborted { summary, .. }
            | Self::Failed { summary, .. } => summary,
        }
    }

    /// The fatal error, if the run failed.
    #[must_use]
    pub const fn error(&self) -> Option<&RunError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// The state this outcome corresponds to.
    #[must_use]
    pub const fn state(&self) -> RunState {
        match self {
            Self::Completed(_) => RunState::Completed,
            Self::Aborted { .. } => RunState::Aborted,
            Self::Failed { .. } => RunState::Failed,
        }
    }
}
