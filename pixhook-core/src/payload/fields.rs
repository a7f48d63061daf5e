//! The logical field catalogue and the per-event flat mapping.

use std::collections::HashMap;

use serde_json::Value;

use super::path::{Lookup, lookup};
use super::profile::{PayloadShape, Profile};

/// Event-level fields: `(logical name, dotted path within the event)`.
pub const EVENT_FIELDS: &[(&str, &str)] = &[
    ("pixel_id", "pixel_id"),
    ("hem_sha256", "hem_sha256"),
    ("event_timestamp", "event_timestamp"),
    ("event_type", "event_type"),
    ("ip_address", "ip_address"),
    ("activity_start_date", "activity_start_date"),
    ("activity_end_date", "activity_end_date"),
    ("referrer", "event_data.referrer"),
    ("page_title", "event_data.title"),
    ("page_url", "event_data.url"),
    ("element_tag", "event_data.element.tag"),
    ("element_text", "event_data.element.text"),
    ("element_href", "event_data.element.attributes.href"),
];

/// Resolution keys in canonical `UPPER_SNAKE` form. The logical field name
/// is the lowercased key.
pub const RESOLUTION_FIELDS: &[&str] = &[
    "UUID",
    "FIRST_NAME",
    "LAST_NAME",
    "AGE_RANGE",
    "GENDER",
    "MARRIED",
    "CHILDREN",
    "INCOME_RANGE",
    "NET_WORTH",
    "HOMEOWNER",
    "PERSONAL_ADDRESS",
    "PERSONAL_CITY",
    "PERSONAL_STATE",
    "PERSONAL_ZIP",
    "PERSONAL_ZIP4",
    "PERSONAL_EMAILS",
    "BUSINESS_EMAIL",
    "MOBILE_PHONE",
    "DIRECT_NUMBER",
    "PERSONAL_PHONE",
    "JOB_TITLE",
    "SENIORITY_LEVEL",
    "DEPARTMENT",
    "COMPANY_NAME",
    "COMPANY_DOMAIN",
    "COMPANY_PHONE",
    "COMPANY_SIC",
    "COMPANY_ADDRESS",
    "COMPANY_CITY",
    "COMPANY_STATE",
    "COMPANY_ZIP",
    "COMPANY_LINKEDIN_URL",
    "COMPANY_REVENUE",
    "COMPANY_EMPLOYEE_COUNT",
    "COMPANY_INDUSTRY",
    "LINKEDIN_URL",
    "FACEBOOK_URL",
    "TWITTER_URL",
    "SKIPTRACE_MATCH_SCORE",
    "SKIPTRACE_NAME",
    "SKIPTRACE_ADDRESS",
    "SKIPTRACE_CITY",
    "SKIPTRACE_STATE",
    "SKIPTRACE_ZIP",
    "SKIPTRACE_LANDLINE_NUMBERS",
    "SKIPTRACE_WIRELESS_NUMBERS",
    "SKIPTRACE_CREDIT_RATING",
    "SKIPTRACE_DNC",
    "SKIPTRACE_EXACT_AGE",
    "SKIPTRACE_ETHNIC_CODE",
    "SKIPTRACE_LANGUAGE_CODE",
    "SKIPTRACE_IP",
    "SKIPTRACE_B2B_ADDRESS",
    "SKIPTRACE_B2B_PHONE",
    "SKIPTRACE_B2B_SOURCE",
    "SKIPTRACE_B2B_WEBSITE",
];

/// Render a JSON value as cell text.
///
/// Null becomes `""`; strings are taken verbatim; numbers and booleans use
/// their JSON form; arrays and objects are rendered as compact JSON. Only
/// null and the empty string count as missing: `0` and `false` are real
/// values and keep their text.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Flat mapping from logical field name to extracted text for one event.
///
/// Only non-empty values are stored; [`FieldMap::get`] returns `""` for
/// everything else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    values: HashMap<String, String>,
}

impl FieldMap {
    /// Flatten `event` according to `profile`.
    ///
    /// In the free-form shape a top-level key of the record wins over the
    /// catalogue path for the field of the same name, and keys outside the
    /// catalogue are kept as well so custom columns can address them.
    pub fn extract(event: &Value, profile: &Profile) -> Self {
        let mut map = Self::default();

        for (name, path) in EVENT_FIELDS {
            map.insert_found(name, lookup(event, path));
        }
        for key in RESOLUTION_FIELDS {
            let path = profile.naming.path(key);
            map.insert_found(&key.to_ascii_lowercase(), lookup(event, &path));
        }

        if profile.shape == PayloadShape::FreeForm
            && let Value::Object(record) = event
        {
            for (key, value) in record {
                map.insert(key, stringify(value));
            }
        }

        map
    }

    /// Value of `name`, or `""` when absent.
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map_or("", String::as_str)
    }

    /// Set `name`; empty values are ignored.
    pub fn insert(&mut self, name: &str, value: String) {
        if !value.is_empty() {
            self.values.insert(name.to_string(), value);
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn insert_found(&mut self, name: &str, found: Lookup<'_>) {
        if let Lookup::Found(value) = found {
            self.insert(name, stringify(value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::ResolutionNaming;
    use serde_json::json;

    #[test]
    fn test_catalogue_has_no_duplicate_names() {
        let mut names: Vec<String> = EVENT_FIELDS
            .iter()
            .map(|(name, _)| name.to_string())
            .chain(RESOLUTION_FIELDS.iter().map(|k| k.to_ascii_lowercase()))
            .collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_extract_event_fields() {
        let event = json!({
            "pixel_id": "px-1",
            "event_type": "click",
            "event_data": {
                "url": "https://example.com/pricing",
                "element": {"tag": "A", "attributes": {"href": "/signup"}}
            }
        });
        let fields = FieldMap::extract(&event, &Profile::default());
        assert_eq!(fields.get("pixel_id"), "px-1");
        assert_eq!(fields.get("event_type"), "click");
        assert_eq!(fields.get("page_url"), "https://example.com/pricing");
        assert_eq!(fields.get("element_tag"), "A");
        assert_eq!(fields.get("element_href"), "/signup");
        assert_eq!(fields.get("element_text"), "");
        assert_eq!(fields.len(), 5);
    }

    #[test]
    fn test_extract_resolution_by_naming() {
        let upper = json!({"resolution": {"FIRST_NAME": "Jane", "COMPANY_NAME": "Acme"}});
        let lower = json!({"resolution": {"first_name": "Jane", "company_name": "Acme"}});

        let fields = FieldMap::extract(&upper, &Profile::default());
        assert_eq!(fields.get("first_name"), "Jane");
        assert_eq!(fields.get("company_name"), "Acme");

        let lower_profile = Profile {
            naming: ResolutionNaming::LowerSnake,
            ..Profile::default()
        };
        let fields = FieldMap::extract(&lower, &lower_profile);
        assert_eq!(fields.get("first_name"), "Jane");

        // Keys in the other convention are not picked up.
        let fields = FieldMap::extract(&upper, &lower_profile);
        assert_eq!(fields.get("first_name"), "");
    }

    #[test]
    fn test_free_form_literal_keys_win() {
        let profile = Profile {
            shape: PayloadShape::FreeForm,
            naming: ResolutionNaming::LowerSnake,
        };
        let record = json!({
            "pixel_id": "px-2",
            "page_url": "https://flat.example.com",
            "event_data": {"url": "https://nested.example.com"},
            "utm_source": "newsletter",
            "resolution": {"first_name": "Sam"},
            "empty": null,
        });
        let fields = FieldMap::extract(&record, &profile);
        assert_eq!(fields.get("pixel_id"), "px-2");
        assert_eq!(fields.get("page_url"), "https://flat.example.com");
        assert_eq!(fields.get("utm_source"), "newsletter");
        assert_eq!(fields.get("first_name"), "Sam");
        assert_eq!(fields.get("empty"), "");
    }

    #[test]
    fn test_zero_and_false_are_kept_as_text() {
        let event = json!({
            "pixel_id": 0,
            "event_type": "",
            "resolution": {"SKIPTRACE_DNC": false, "COMPANY_EMPLOYEE_COUNT": 0, "AGE_RANGE": null}
        });
        let fields = FieldMap::extract(&event, &Profile::default());
        assert_eq!(fields.get("pixel_id"), "0");
        assert_eq!(fields.get("skiptrace_dnc"), "false");
        assert_eq!(fields.get("company_employee_count"), "0");
        assert_eq!(fields.get("event_type"), "");
        assert_eq!(fields.get("age_range"), "");
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn test_stringify() {
        assert_eq!(stringify(&json!(null)), "");
        assert_eq!(stringify(&json!("+15551234567")), "+15551234567");
        assert_eq!(stringify(&json!(42)), "42");
        assert_eq!(stringify(&json!(1.5)), "1.5");
        assert_eq!(stringify(&json!(true)), "true");
        assert_eq!(stringify(&json!(["a", "b"])), r#"["a","b"]"#);
        assert_eq!(stringify(&json!({"k": 1})), r#"{"k":1}"#);
    }
}
