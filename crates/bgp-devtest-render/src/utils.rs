//! Pure helpers exposed to the renderer unchanged.

use serde_json::Value;

/// Normalize a routing-policy name for use in device configuration.
pub fn format_route_policy_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            let c = c.to_ascii_uppercase();
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Walk a `.`-separated path through objects and arrays.
///
/// Numeric segments index into arrays. Returns `None` as soon as a step
/// is missing.
pub fn deep_get<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    deep_get_with(value, path, '.')
}

/// [`deep_get`] with a caller-chosen separator
pub fn deep_get_with<'a>(value: &'a Value, path: &str, separator: char) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }

    let mut current = value;
    for part in path.split(separator) {
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}
