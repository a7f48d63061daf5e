//! Deployment profiles.
//!
//! Deployments differ in two independent ways: whether a request carries an
//! `events` array or is itself one flat record, and whether resolution keys
//! are `UPPER_SNAKE` or `lower_snake`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level shape of an inbound request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadShape {
    /// `{ "events": [ {...}, ... ] }`
    #[default]
    Events,
    /// Query parameters merged with body fields form a single event.
    FreeForm,
}

/// Key casing used inside the `resolution` object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionNaming {
    /// `resolution.FIRST_NAME`
    #[default]
    UpperSnake,
    /// `resolution.first_name`
    LowerSnake,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub shape: PayloadShape,
    #[serde(default)]
    pub naming: ResolutionNaming,
}

impl PayloadShape {
    /// Split a merged request payload into events.
    ///
    /// Anything that does not have the expected shape yields no events.
    pub fn events(self, payload: Value) -> Vec<Value> {
        match (self, payload) {
            (PayloadShape::Events, Value::Object(mut map)) => match map.remove("events") {
                Some(Value::Array(events)) => events,
                _ => Vec::new(),
            },
            (PayloadShape::FreeForm, Value::Object(map)) if !map.is_empty() => {
                vec![Value::Object(map)]
            }
            _ => Vec::new(),
        }
    }
}

impl ResolutionNaming {
    /// Path of a resolution field given its canonical `UPPER_SNAKE` key.
    pub fn path(self, key: &str) -> String {
        match self {
            ResolutionNaming::UpperSnake => format!("resolution.{key}"),
            ResolutionNaming::LowerSnake => format!("resolution.{}", key.to_ascii_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_events_shape() {
        let events = PayloadShape::Events.events(json!({"events": [{"a": 1}, {"b": 2}]}));
        assert_eq!(events.len(), 2);

        assert!(PayloadShape::Events.events(json!({"events": []})).is_empty());
        assert!(PayloadShape::Events.events(json!({})).is_empty());
        assert!(PayloadShape::Events.events(json!({"events": "nope"})).is_empty());
        assert!(PayloadShape::Events.events(json!([{"a": 1}])).is_empty());
        assert!(PayloadShape::Events.events(json!(null)).is_empty());
    }

    #[test]
    fn test_free_form_shape() {
        let events = PayloadShape::FreeForm.events(json!({"pixel_id": "px"}));
        assert_eq!(events, vec![json!({"pixel_id": "px"})]);

        assert!(PayloadShape::FreeForm.events(json!({})).is_empty());
        assert!(PayloadShape::FreeForm.events(json!("text")).is_empty());
    }

    #[test]
    fn test_resolution_paths() {
        assert_eq!(
            ResolutionNaming::UpperSnake.path("FIRST_NAME"),
            "resolution.FIRST_NAME"
        );
        assert_eq!(
            ResolutionNaming::LowerSnake.path("FIRST_NAME"),
            "resolution.first_name"
        );
    }

    #[test]
    fn test_profile_deserialize_defaults() {
        let profile: Profile = serde_json::from_value(json!({"shape": "free_form"})).unwrap();
        assert_eq!(profile.shape, PayloadShape::FreeForm);
        assert_eq!(profile.naming, ResolutionNaming::UpperSnake);
    }
}
