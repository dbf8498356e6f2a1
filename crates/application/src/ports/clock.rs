//! Clock port

use chrono::{DateTime, Utc};

/// Port for the wall-clock time stamped on each dispatched request.
///
/// Durations are measured with a monotonic timer; this clock only provides
/// the timestamps recorded in run summaries, so tests can pin them.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}
