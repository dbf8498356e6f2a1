//! Dotted path lookup into JSON values.
//!
//! Supports `field`, `field.nested`, `items[0].id` and `items.0.id`.

use serde_json::Value;

/// Looks up a dotted path inside a JSON value.
///
/// Returns `None` when any segment is missing. An empty path addresses the
/// value itself.
#[must_use]
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;

    for segment in split_path_segments(path.trim()) {
        if let Some((name, indexes)) = parse_array_access(&segment) {
            if !name.is_empty() {
                current = step(current, name)?;
            }
            for index in indexes {
                current = step(current, index)?;
            }
        } else {
            current = step(current, &segment)?;
        }
    }

    Some(current)
}

/// Returns true if the path resolves inside the value.
#[must_use]
pub fn contains(value: &Value, path: &str) -> bool {
    lookup(value, path).is_some()
}

fn step<'a>(current: &'a Value, key: &str) -> Option<&'a Value> {
    match current {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|idx| items.get(idx)),
        _ => None,
    }
}

/// Split a path into segments, respecting array brackets.
fn split_path_segments(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_bracket = false;

    for ch in path.chars() {
        match ch {
            '.' if !in_bracket => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            '[' => {
                in_bracket = true;
                current.push(ch);
            }
            ']' => {
                in_bracket = false;
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Parse array access like `field[0][1]` into `("field", ["0", "1"])`.
fn parse_array_access(segment: &str) -> Option<(&str, Vec<&str>)> {
    let bracket_start = segment.find('[')?;
    if !segment.ends_with(']') {
        return None;
    }

    let name = &segment[..bracket_start];
    let indexes = segment[bracket_start + 1..segment.len() - 1]
        .split("][")
        .collect();
    Some((name, indexes))
}
