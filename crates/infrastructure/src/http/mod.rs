//! HTTP infrastructure utilities.
//!
//! Body encoding for JSON, urlencoded and multipart payloads.

mod body_builder;

pub use body_builder::{BodyBuildError, BuiltBody, build_body, mime_type};
