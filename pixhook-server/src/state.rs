//! Application state shared across all request handlers.

use pixhook_core::config::RuntimeConfig;
use pixhook_core::processors::EventIngestor;
use pixhook_sdk::client::{ClientError, CrmClient, SheetsClient, default_http_client};
use std::sync::Arc;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
#[derive(Clone)]
pub struct AppState {
    /// The ingestor with whichever sinks are configured.
    pub ingestor: Arc<EventIngestor>,
}

impl AppState {
    pub fn new(ingestor: EventIngestor) -> Self {
        Self {
            ingestor: Arc::new(ingestor),
        }
    }

    /// Build the sink clients described by `config` and wrap them in an
    /// ingestor. Missing sections leave the matching sink disabled.
    pub fn from_config(config: &RuntimeConfig) -> Result<Self, ClientError> {
        let http = default_http_client();
        let mut ingestor = EventIngestor::new(config.ingest.clone());

        match &config.sheets {
            Some(sheets) => {
                let client = SheetsClient::new(
                    sheets.spreadsheet_id.clone(),
                    sheets.range.clone(),
                    sheets.credentials.clone(),
                )?
                .with_http_client(http.clone())
                .with_base_url(sheets.base_url.clone());
                tracing::info!(
                    spreadsheet_id = %sheets.spreadsheet_id,
                    range = %sheets.range,
                    service_account = %sheets.credentials.client_email,
                    "Row-sink enabled"
                );
                ingestor = ingestor.with_row_sink(Arc::new(client));
            }
            None => tracing::warn!("Row-sink not configured, events will not be logged"),
        }

        match &config.crm {
            Some(crm) => {
                let client = CrmClient::new(crm.base_url.clone(), crm.api_key.clone())
                    .with_http_client(http);
                tracing::info!(base_url = %crm.base_url, source = %crm.source, "CRM sync enabled");
                ingestor = ingestor.with_crm(Arc::new(client), crm.source.clone());
            }
            None => tracing::info!("CRM not configured, lead sync disabled"),
        }

        tracing::info!(
            shape = ?config.ingest.profile.shape,
            naming = ?config.ingest.profile.naming,
            columns = config.ingest.schema.len(),
            row_sink = ingestor.row_sink_enabled(),
            crm = ingestor.crm_enabled(),
            "Ingestor ready"
        );

        Ok(Self::new(ingestor))
    }
}
