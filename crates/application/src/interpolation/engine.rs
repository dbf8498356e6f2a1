//! Interpolation engine
//!
//! Substitutes `${name}` placeholders with values from the run context.

use serde_json::{Map, Value};
use tracing::trace;

use sequent_domain::ContextStore;

use super::parser::parse_placeholders;

/// Result of interpolating one string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpolation {
    /// The string with every resolvable placeholder substituted.
    pub resolved: String,

    /// Names that were found in the context, in order of appearance.
    pub resolved_names: Vec<String>,

    /// Names left untouched because the context lacks them.
    pub unresolved: Vec<String>,
}

impl Interpolation {
    /// Returns true when no placeholder was left unresolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Interpolates a template against the context and reports what resolved.
///
/// Unresolved placeholders are kept verbatim. The substitution is a single
/// pass: text coming from a context value is never re-scanned.
#[must_use]
pub fn resolve(template: &str, context: &ContextStore) -> Interpolation {
    let references = parse_placeholders(template);

    if references.is_empty() {
        return Interpolation {
            resolved: template.to_string(),
            resolved_names: Vec::new(),
            unresolved: Vec::new(),
        };
    }

    let mut resolved_names = Vec::new();
    let mut unresolved = Vec::new();
    let mut result = String::with_capacity(template.len());
    let mut last_end = 0;

    for placeholder in &references {
        result.push_str(&template[last_end..placeholder.span.start]);

        if let Some(value) = context.resolve(&placeholder.name) {
            result.push_str(&render_value(value));
            resolved_names.push(placeholder.name.clone());
        } else {
            result.push_str(&template[placeholder.span.clone()]);
            unresolved.push(placeholder.name.clone());
        }

        last_end = placeholder.span.end;
    }

    result.push_str(&template[last_end..]);

    let interpolation = Interpolation {
        resolved: result,
        resolved_names,
        unresolved,
    };
    if !interpolation.is_complete() {
        trace!(template, unresolved = ?interpolation.unresolved, "placeholders left unresolved");
    }
    interpolation
}

/// Interpolates a template against the context.
///
/// # Examples
///
/// ```
/// use sequent_application::interpolation::interpolate;
/// use sequent_domain::ContextStore;
/// use serde_json::json;
///
/// let mut context = ContextStore::new();
/// context.insert("id", json!(7));
///
/// assert_eq!(interpolate("widgets/${id}", &context), "widgets/7");
/// assert_eq!(interpolate("${missing}", &context), "${missing}");
/// ```
#[must_use]
pub fn interpolate(template: &str, context: &ContextStore) -> String {
    resolve(template, context).resolved
}

/// Interpolates every string leaf of a JSON value, recursing through objects
/// and arrays. Non-string leaves are returned unchanged.
#[must_use]
pub fn interpolate_value(value: &Value, context: &ContextStore) -> Value {
    match value {
        Value::String(s) => Value::String(interpolate(s, context)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| interpolate_value(item, context))
                .collect(),
        ),
        Value::Object(map) => Value::Object(interpolate_map(map, context)),
        other => other.clone(),
    }
}

/// Interpolates every string leaf of a JSON object.
#[must_use]
pub fn interpolate_map(map: &Map<String, Value>, context: &ContextStore) -> Map<String, Value> {
    map.iter()
        .map(|(key, value)| (key.clone(), interpolate_value(value, context)))
        .collect()
}

/// Renders a context value as the text substituted for its placeholder.
///
/// Strings are inserted verbatim; every other value uses its compact JSON
/// text (`7`, `true`, `null`, `{"a":1}`).
#[must_use]
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
