//! CRM contact directory bodies.
//!
//! Field names follow the camelCase JSON used by the contacts API.

use serde::{Deserialize, Serialize};

/// A contact as returned by lookup or create. Only the id is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Response of `GET /contacts/lookup`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactLookupResponse {
    #[serde(default)]
    pub contacts: Vec<ContactRef>,
}

/// Body of `POST /contacts/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,
    pub source: String,
}

/// Response of `POST /contacts/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContactEnvelope {
    pub contact: ContactRef,
}

/// Body of `POST /contacts/{id}/notes/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    pub body: String,
}
