//! HTTP request domain types

mod method;
mod prepared;

pub use method::HttpMethod;
pub use prepared::{FileAttachment, PreparedRequest, RequestPayload};
