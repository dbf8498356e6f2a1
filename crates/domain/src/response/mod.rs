//! HTTP response domain types

mod spec;

pub use spec::{StatusCode, TestResponse, decode_body};
