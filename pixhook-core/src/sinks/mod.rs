//! Outbound sinks.
//!
//! The ingestor only sees these traits; [`sheets`] and [`crm`] adapt the SDK
//! clients to them. Every call returns a `Result` so the caller can log a
//! failure and carry on.

pub mod crm;
pub mod sheets;

use async_trait::async_trait;
use pixhook_sdk::client::ClientError;
use pixhook_sdk::objects::CreateContactRequest;
use thiserror::Error;

/// Errors surfaced by sink calls.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The underlying HTTP client failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The sink answered but the answer was unusable.
    #[error("unexpected sink response: {0}")]
    Unexpected(String),
}

/// Append-only tabular store.
#[async_trait]
pub trait RowSink: Send + Sync {
    /// Append `rows` after the existing rows. Returns the number written.
    async fn append_rows(&self, rows: Vec<Vec<String>>) -> Result<u64, SinkError>;
}

/// Contact directory.
#[async_trait]
pub trait CrmSink: Send + Sync {
    /// Find a contact by email and/or phone. Returns its id.
    async fn find_contact(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Option<String>, SinkError>;

    /// Create a contact. Returns its id.
    async fn create_contact(&self, contact: &CreateContactRequest) -> Result<String, SinkError>;

    /// Attach a free-text note to a contact.
    async fn add_note(&self, contact_id: &str, body: &str) -> Result<(), SinkError>;
}
