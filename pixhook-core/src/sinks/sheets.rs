//! [`RowSink`] over the Google Sheets client.

use async_trait::async_trait;
use pixhook_sdk::client::SheetsClient;

use super::{RowSink, SinkError};

#[async_trait]
impl RowSink for SheetsClient {
    async fn append_rows(&self, rows: Vec<Vec<String>>) -> Result<u64, SinkError> {
        let submitted = rows.len() as u64;
        let resp = SheetsClient::append_rows(self, rows).await?;
        tracing::debug!(
            spreadsheet_id = %resp.spreadsheet_id,
            table_range = ?resp.table_range,
            "Sheets append acknowledged"
        );
        // Older responses omit `updates`; trust the submitted count then.
        Ok(match resp.updated_rows() {
            0 => submitted,
            n => n,
        })
    }
}
