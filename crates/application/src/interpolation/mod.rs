//! Variable interpolation module
//!
//! Resolves `${variable}` placeholders against the run context.
//!
//! # Usage
//!
//! ```
//! use sequent_application::interpolation::{interpolate, resolve};
//! use sequent_domain::ContextStore;
//! use serde_json::json;
//!
//! let mut context = ContextStore::new();
//! context.insert("token", json!("abc"));
//!
//! assert_eq!(interpolate("Bearer ${token}", &context), "Bearer abc");
//!
//! let result = resolve("${token}/${later}", &context);
//! assert_eq!(result.unresolved, vec!["later"]);
//! ```

mod engine;
mod parser;

pub use engine::{
    Interpolation, interpolate, interpolate_map, interpolate_value, render_value, resolve,
};
pub use parser::{Placeholder, parse_placeholders};
