//! Dotted-path lookup over `serde_json::Value`.

use serde_json::Value;

/// Result of walking a dotted path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    /// The path resolved to a non-null value.
    Found(&'a Value),
    /// Some segment was absent, null, or not traversable.
    Missing,
}

impl<'a> Lookup<'a> {
    pub fn value(self) -> Option<&'a Value> {
        match self {
            Lookup::Found(v) => Some(v),
            Lookup::Missing => None,
        }
    }
}

/// Walk `path` (e.g. `event_data.element.attributes.href`) through `root`.
///
/// Object segments are keys; on arrays a segment must be a decimal index.
/// Null at any point, including the final value, yields [`Lookup::Missing`].
/// An empty path refers to `root` itself.
pub fn lookup<'a>(root: &'a Value, path: &str) -> Lookup<'a> {
    let mut current = root;
    if !path.is_empty() {
        for segment in path.split('.') {
            let next = match current {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            };
            match next {
                Some(value) if !value.is_null() => current = value,
                _ => return Lookup::Missing,
            }
        }
    }

    if current.is_null() {
        Lookup::Missing
    } else {
        Lookup::Found(current)
    }
}

/// Look up `path` and render it as a cell string, or `default` when missing.
pub fn get_or(root: &Value, path: &str, default: &str) -> String {
    lookup(root, path)
        .value()
        .map_or_else(|| default.to_string(), super::stringify)
}
