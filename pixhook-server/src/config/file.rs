//! TOML file configuration structures.
//!
//! These structs directly map to the `pixhook-config.toml` file format.
//! Every section is optional; a missing file behaves like an empty one.

use pixhook_core::payload::{PayloadShape, ResolutionNaming};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use url::Url;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub sheets: SheetsConfig,
    #[serde(default)]
    pub crm: CrmConfig,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:8080").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

/// Ingest section: payload profile and optional custom column order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestConfig {
    #[serde(default)]
    pub shape: PayloadShape,
    #[serde(default)]
    pub naming: ResolutionNaming,
    /// Sheet columns in physical order. Defaults to the full field catalogue.
    #[serde(default)]
    pub columns: Option<Vec<String>>,
}

/// Spreadsheet row-sink section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetsConfig {
    pub spreadsheet_id: Option<String>,
    pub range: Option<String>,
    /// Path to a service-account key JSON file.
    pub credentials_file: Option<PathBuf>,
    /// Service-account key JSON, inline.
    pub credentials: Option<String>,
    /// Sheets API root, for emulators or proxies.
    pub base_url: Option<Url>,
}

/// CRM section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrmConfig {
    pub api_key: Option<String>,
    pub base_url: Option<Url>,
    /// Source tag for created contacts.
    pub source: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parsing() {
        let toml_str = r#"
[server]
listen = "127.0.0.1:3000"

[ingest]
shape = "free_form"
naming = "lower_snake"
columns = ["pixel_id", "event_type", "first_name"]

[sheets]
spreadsheet_id = "1AbC"
range = "Events"
credentials_file = "/etc/pixhook/sa.json"

[crm]
api_key = "crm-key"
base_url = "https://crm.example.com/v1"
source = "Landing Page"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen.port(), 3000);
        assert_eq!(config.ingest.shape, PayloadShape::FreeForm);
        assert_eq!(config.ingest.naming, ResolutionNaming::LowerSnake);
        assert_eq!(config.ingest.columns.as_ref().map(Vec::len), Some(3));
        assert_eq!(config.sheets.spreadsheet_id.as_deref(), Some("1AbC"));
        assert_eq!(
            config.crm.base_url.as_ref().map(Url::as_str),
            Some("https://crm.example.com/v1")
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.listen, default_listen_addr());
        assert_eq!(config.ingest.shape, PayloadShape::Events);
        assert!(config.ingest.columns.is_none());
        assert!(config.sheets.spreadsheet_id.is_none());
        assert!(config.crm.api_key.is_none());
    }

    #[test]
    fn test_example_config_parses() {
        let config: FileConfig =
            toml::from_str(include_str!("../../../pixhook-config.example.toml")).unwrap();
        assert_eq!(config.ingest.shape, PayloadShape::Events);
        assert_eq!(config.sheets.range.as_deref(), Some("Sheet1"));
        assert!(config.sheets.credentials_file.is_none());
    }

    #[test]
    fn test_unknown_shape_is_rejected() {
        assert!(toml::from_str::<FileConfig>("[ingest]\nshape = \"batch\"\n").is_err());
    }
}
