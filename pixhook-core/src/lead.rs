//! Lead qualification for CRM sync.

use crate::payload::FieldMap;

/// Written into notes when the event carries no page URL.
pub const MISSING_URL_PLACEHOLDER: &str = "N/A";

/// Identity derived from an event's resolution data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadRecord {
    pub first_name: String,
    pub last_name: String,
    /// First address from the comma-separated email list.
    pub email: String,
    /// Digits only.
    pub phone: String,
}

impl LeadRecord {
    pub fn from_fields(fields: &FieldMap) -> Self {
        let email = match first_email(fields.get("personal_emails")) {
            "" => first_email(fields.get("business_email")),
            found => found,
        };
        let phone = ["mobile_phone", "direct_number", "personal_phone"]
            .into_iter()
            .map(|name| sanitize_phone(fields.get(name)))
            .find(|digits| !digits.is_empty())
            .unwrap_or_default();

        Self {
            first_name: fields.get("first_name").trim().to_string(),
            last_name: fields.get("last_name").trim().to_string(),
            email: email.to_string(),
            phone,
        }
    }

    /// First and last name, plus an email or a phone number.
    pub fn is_qualified(&self) -> bool {
        !self.first_name.is_empty()
            && !self.last_name.is_empty()
            && (!self.email.is_empty() || !self.phone.is_empty())
    }

    pub fn email(&self) -> Option<&str> {
        Some(self.email.as_str()).filter(|e| !e.is_empty())
    }

    pub fn phone(&self) -> Option<&str> {
        Some(self.phone.as_str()).filter(|p| !p.is_empty())
    }
}

/// First non-empty entry of a comma-separated list, trimmed.
pub fn first_email(list: &str) -> &str {
    list.split(',').map(str::trim).find(|e| !e.is_empty()).unwrap_or("")
}

/// Strip everything except ASCII digits.
pub fn sanitize_phone(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Text of the activity note attached to an existing contact.
pub fn activity_note(fields: &FieldMap) -> String {
    let url = match fields.get("page_url") {
        "" => MISSING_URL_PLACEHOLDER,
        url => url,
    };
    format!(
        "Pixel event: {}\nSource URL: {}\nTimestamp: {}",
        fields.get("event_type"),
        url,
        fields.get("event_timestamp"),
    )
}
