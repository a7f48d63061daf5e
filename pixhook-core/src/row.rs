//! Row schema and projection.
//!
//! A [`RowSchema`] is the ordered list of sheet columns. Projecting a
//! [`FieldMap`] onto it yields exactly one string per column, so every batch
//! sent to the row-sink is rectangular.

use crate::payload::{EVENT_FIELDS, FieldMap, RESOLUTION_FIELDS};

/// Marker prepended to values the spreadsheet would otherwise parse as a
/// formula or number.
pub const ESCAPE_MARKER: char = '\'';

/// Ordered column names. Must match the sheet's physical column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSchema {
    columns: Vec<String>,
}

impl Default for RowSchema {
    /// The full field catalogue: event fields, then resolution fields.
    fn default() -> Self {
        let columns = EVENT_FIELDS
            .iter()
            .map(|(name, _)| name.to_string())
            .chain(RESOLUTION_FIELDS.iter().map(|key| key.to_ascii_lowercase()))
            .collect();
        Self { columns }
    }
}

impl RowSchema {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Position of `column`, if the schema has it.
    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Build the row for `fields`, escaping values as needed.
    pub fn project(&self, fields: &FieldMap) -> ProjectedRow {
        ProjectedRow(
            self.columns
                .iter()
                .map(|column| escape_cell(fields.get(column)))
                .collect(),
        )
    }
}

/// One value per schema column, in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedRow(Vec<String>);

impl ProjectedRow {
    pub fn cells(&self) -> &[String] {
        &self.0
    }

    pub fn into_cells(self) -> Vec<String> {
        self.0
    }

    /// Cell at `index` with any escape marker removed.
    pub fn value_at(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(|cell| unescape_cell(cell))
    }
}

/// Prefix values starting with `+` (E.164 phone numbers and the like) with
/// [`ESCAPE_MARKER`].
pub fn escape_cell(value: &str) -> String {
    if value.starts_with('+') {
        format!("{ESCAPE_MARKER}{value}")
    } else {
        value.to_string()
    }
}

/// Inverse of [`escape_cell`].
pub fn unescape_cell(cell: &str) -> &str {
    match cell.strip_prefix(ESCAPE_MARKER) {
        Some(rest) if rest.starts_with('+') => rest,
        _ => cell,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::Profile;
    use serde_json::json;

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("+1 (555) 123-4567"), "'+1 (555) 123-4567");
        assert_eq!(escape_cell("15551234567"), "15551234567");
        assert_eq!(escape_cell("a+b"), "a+b");
        assert_eq!(escape_cell(""), "");
    }

    #[test]
    fn test_unescape_only_strips_marked_plus() {
        assert_eq!(unescape_cell("'+15551234567"), "+15551234567");
        assert_eq!(unescape_cell("'quoted"), "'quoted");
        assert_eq!(unescape_cell("plain"), "plain");
    }

    #[test]
    fn test_row_without_enrichment_is_identifiers_only() {
        let schema = RowSchema::default();
        let event = json!({"pixel_id": "px-1", "hem_sha256": "abc123"});
        let row = schema.project(&FieldMap::extract(&event, &Profile::default()));

        assert_eq!(row.cells().len(), schema.len());
        for (column, cell) in schema.columns().iter().zip(row.cells()) {
            match column.as_str() {
                "pixel_id" => assert_eq!(cell, "px-1"),
                "hem_sha256" => assert_eq!(cell, "abc123"),
                _ => assert_eq!(cell, ""),
            }
        }
    }

    #[test]
    fn test_projection_preserves_order_and_unknown_columns() {
        let schema = RowSchema::new(vec![
            "event_type".to_string(),
            "not_a_field".to_string(),
            "mobile_phone".to_string(),
            "pixel_id".to_string(),
        ]);
        let event = json!({
            "pixel_id": "px",
            "event_type": "page_view",
            "resolution": {"MOBILE_PHONE": "+1 (555) 123-4567"}
        });
        let row = schema.project(&FieldMap::extract(&event, &Profile::default()));
        assert_eq!(
            row.cells(),
            ["page_view", "", "'+1 (555) 123-4567", "px"]
        );
    }

    #[test]
    fn test_projection_recovers_values_by_index() {
        let schema = RowSchema::default();
        let event = json!({
            "pixel_id": "px-9",
            "event_timestamp": "2024-05-01T12:00:00Z",
            "event_data": {"title": "Pricing", "element": {"text": "+ Add seat"}},
            "resolution": {
                "FIRST_NAME": "Jane",
                "MOBILE_PHONE": "+15551234567",
                "COMPANY_EMPLOYEE_COUNT": 120,
                "SKIPTRACE_DNC": true
            }
        });
        let fields = FieldMap::extract(&event, &Profile::default());
        let row = schema.project(&fields);

        for (index, column) in schema.columns().iter().enumerate() {
            assert_eq!(row.value_at(index), Some(fields.get(column)), "column {column}");
        }
        let phone = schema.index_of("mobile_phone").unwrap();
        assert_eq!(row.cells()[phone], "'+15551234567");
        let count = schema.index_of("company_employee_count").unwrap();
        assert_eq!(row.cells()[count], "120");
    }
}
