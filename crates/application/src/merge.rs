//! Structural merge for descriptor partials.
//!
//! Objects merge key by key, recursively. Arrays and scalars on the
//! overriding side replace the base value outright.

use serde_json::{Map, Value};

/// Merges `overlay` on top of `base` in place.
///
/// # Examples
///
/// ```
/// use sequent_application::merge::deep_merge;
/// use serde_json::json;
///
/// let mut base = json!({"headers": {"a": 1, "b": 2}, "tags": [1, 2]});
/// deep_merge(&mut base, &json!({"headers": {"b": 3}, "tags": [9]}));
///
/// assert_eq!(base, json!({"headers": {"a": 1, "b": 3}, "tags": [9]}));
/// ```
pub fn deep_merge(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            merge_maps(base_map, overlay_map);
        }
        (base, overlay) => *base = overlay.clone(),
    }
}

/// Merges `overlay` into `base` key by key.
pub fn merge_maps(base: &mut Map<String, Value>, overlay: &Map<String, Value>) {
    for (key, value) in overlay {
        match base.get_mut(key) {
            Some(existing) => deep_merge(existing, value),
            None => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Folds layers left to right: later layers override earlier ones.
#[must_use]
pub fn merge_layers<'a>(layers: impl IntoIterator<Item = &'a Map<String, Value>>) -> Map<String, Value> {
    layers.into_iter().fold(Map::new(), |mut acc, layer| {
        merge_maps(&mut acc, layer);
        acc
    })
}
