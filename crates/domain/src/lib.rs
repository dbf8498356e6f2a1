//! Sequent Domain - Core test-runner types
//!
//! This crate defines the domain model for the Sequent HTTP test runner:
//! descriptors, expectations, the run context, responses and run outcomes.
//! All types here are pure Rust with no I/O dependencies.

pub mod context;
pub mod descriptor;
pub mod error;
pub mod expectation;
pub mod extraction;
pub mod failure;
pub mod path;
pub mod request;
pub mod response;
pub mod state;
pub mod value_type;

pub use context::ContextStore;
pub use descriptor::{DEFAULT_UPLOAD_FIELD, FileUpload, TestDescriptor};
pub use error::{DomainError, DomainResult};
pub use expectation::{DEFAULT_STATUS_CODE, Expectation, PropertySpec};
pub use extraction::ExtractionSpec;
pub use failure::TestFailure;
pub use request::{FileAttachment, HttpMethod, PreparedRequest, RequestPayload};
pub use response::{StatusCode, TestResponse};
pub use state::{RunError, RunOutcome, RunState, RunSummary, TestRecord, TestStatus};
pub use value_type::{TypeExpectation, ValueType};
