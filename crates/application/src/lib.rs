//! Sequent application layer
//!
//! Interpolation, expectation matching, variable extraction, descriptor
//! registration and the test runner, wired to the outside world through the
//! ports in [`ports`].

pub mod error;
pub mod extractor;
pub mod interpolation;
pub mod matcher;
pub mod merge;
pub mod ports;
pub mod registry;
pub mod runner;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult};
pub use extractor::{Assignment, extract};
pub use interpolation::{interpolate, interpolate_value};
pub use matcher::{CheckReport, ExpectationMatcher, match_response};
pub use merge::deep_merge;
pub use registry::TestRegistry;
pub use runner::{DEFAULT_BASE_PATH, RunnerSettings, Step, TestRunner};
pub use use_cases::{RunSession, RunSessionInput};
