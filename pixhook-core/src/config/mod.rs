//! Configuration types for pixhook.
//!
//! These types represent the validated runtime configuration handed to the
//! ingestor at start-up. Loading and parsing is handled by the server crate.
//! Each integration is optional on its own: a missing [`SheetsConfig`]
//! disables the row-sink, a missing [`CrmConfig`] disables CRM sync.

mod crm;
mod ingest;
mod server;
mod sheets;

pub use crm::{CrmConfig, DEFAULT_CONTACT_SOURCE};
pub use ingest::IngestConfig;
pub use server::ServerConfig;
pub use sheets::{DEFAULT_SHEET_RANGE, SheetsConfig};

/// Complete configuration, built once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Listen address and similar server settings.
    pub server: ServerConfig,
    /// Payload profile and row schema.
    pub ingest: IngestConfig,
    /// Spreadsheet row-sink, if configured.
    pub sheets: Option<SheetsConfig>,
    /// CRM contact sync, if configured.
    pub crm: Option<CrmConfig>,
}
