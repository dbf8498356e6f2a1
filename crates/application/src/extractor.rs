//! Variable extraction.
//!
//! After a response passes its expectation, each extraction rule copies a
//! value out of the body into the run context.

use serde_json::Value;
use tracing::debug;

use sequent_domain::path;
use sequent_domain::{ContextStore, ExtractionSpec, TestFailure};

/// A value written to the context by one extraction rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Context name written.
    pub name: String,
    /// Value stored.
    pub value: Value,
}

/// Applies extraction rules in order, writing each value to the context.
///
/// Every path is mandatory. Rules before the missing one have already been
/// applied when the error is returned.
///
/// # Errors
/// Returns [`TestFailure::MissingExtractionPath`] for the first path that does
/// not exist in the body.
pub fn extract(
    body: &Value,
    specs: &[ExtractionSpec],
    context: &mut ContextStore,
) -> Result<Vec<Assignment>, TestFailure> {
    let mut assignments = Vec::with_capacity(specs.len());

    for spec in specs {
        let value = path::lookup(body, &spec.path)
            .cloned()
            .ok_or_else(|| TestFailure::MissingExtractionPath {
                path: spec.path.clone(),
            })?;

        let name = spec.target().to_string();
        debug!(variable = %name, path = %spec.path, "variable extracted");
        context.insert(name.clone(), value.clone());
        assignments.push(Assignment { name, value });
    }

    Ok(assignments)
}
