//! Sequent Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, the suite file loader and the
//! logging setup used by the binary.

pub mod adapters;
pub mod console;
pub mod http;
pub mod logging;
pub mod suite;

pub use adapters::{ReadinessPolicy, RemoteHost, ReqwestTransport, SystemClock};
pub use console::{AssumeYes, ConsoleReporter, StdinPrompt};
pub use http::{BodyBuildError, BuiltBody, build_body};
pub use logging::init_logging;
pub use suite::{LoadedSuite, SuiteFile, SuiteFileError, SuiteFormat};
