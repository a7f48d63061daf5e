//! Google Sheets `values:append` bodies.

use serde::{Deserialize, Serialize};

/// Body of `POST /v4/spreadsheets/{id}/values/{range}:append`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendValuesRequest {
    pub values: Vec<Vec<String>>,
}

/// Response of a successful append.
///
/// Only the fields pixhook logs are modelled; everything else is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendValuesResponse {
    #[serde(default)]
    pub spreadsheet_id: String,
    #[serde(default)]
    pub table_range: Option<String>,
    #[serde(default)]
    pub updates: Option<UpdatedRange>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedRange {
    #[serde(default)]
    pub updated_range: String,
    #[serde(default)]
    pub updated_rows: u64,
    #[serde(default)]
    pub updated_cells: u64,
}

impl AppendValuesResponse {
    /// Number of rows the API reports as written.
    pub fn updated_rows(&self) -> u64 {
        self.updates.as_ref().map_or(0, |u| u.updated_rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_response_parsing() {
        let json = r#"{
            "spreadsheetId": "abc",
            "tableRange": "Sheet1!A1:C4",
            "updates": {
                "spreadsheetId": "abc",
                "updatedRange": "Sheet1!A5:C6",
                "updatedRows": 2,
                "updatedColumns": 3,
                "updatedCells": 6
            }
        }"#;
        let resp: AppendValuesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.spreadsheet_id, "abc");
        assert_eq!(resp.updated_rows(), 2);
        assert_eq!(resp.updates.unwrap().updated_range, "Sheet1!A5:C6");
    }

    #[test]
    fn test_append_response_without_updates() {
        let resp: AppendValuesResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.updated_rows(), 0);
    }
}
