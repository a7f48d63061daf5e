//! Request and response bodies for every outbound API pixhook talks to.

pub mod crm;
pub mod oauth;
pub mod sheets;

pub use crm::{
    ContactEnvelope, ContactLookupResponse, ContactRef, CreateContactRequest, CreateNoteRequest,
};
pub use oauth::{AccessTokenResponse, JWT_BEARER_GRANT_TYPE};
pub use sheets::{AppendValuesRequest, AppendValuesResponse, UpdatedRange};
