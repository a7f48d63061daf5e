//! Spreadsheet row-sink configuration.

use pixhook_sdk::service_account::ServiceAccountKey;
use url::Url;

/// Range appended to when none is configured.
pub const DEFAULT_SHEET_RANGE: &str = "Sheet1";

#[derive(Debug, Clone)]
pub struct SheetsConfig {
    /// Target spreadsheet id (the long id in the sheet URL).
    pub spreadsheet_id: String,
    /// Sheet name or A1 range rows are appended after.
    pub range: String,
    /// Service-account key used to mint access tokens.
    pub credentials: ServiceAccountKey,
    /// Sheets API root.
    pub base_url: Url,
}
