//! Configuration module for pixhook-server.
//!
//! Handles loading configuration from an optional TOML file, then applying
//! CLI/environment overrides, then resolving credentials into the runtime
//! configuration consumed by the ingestor.

pub mod file;

use crate::config::file::FileConfig;
use pixhook_core::config::{
    CrmConfig, DEFAULT_CONTACT_SOURCE, DEFAULT_SHEET_RANGE, IngestConfig, RuntimeConfig,
    ServerConfig, SheetsConfig,
};
use pixhook_core::payload::Profile;
use pixhook_core::row::RowSchema;
use pixhook_sdk::client::{DEFAULT_CRM_BASE_URL, DEFAULT_SHEETS_BASE_URL};
use pixhook_sdk::service_account::{ServiceAccountError, ServiceAccountKey};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("failed to read credentials file {path:?}: {source}")]
    CredentialsFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid service account credentials: {0}")]
    Credentials(#[from] ServiceAccountError),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

/// Values supplied on the command line or through the environment.
/// Each one, when present, replaces the matching file setting.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub listen: Option<SocketAddr>,
    pub sheet_id: Option<String>,
    pub sheet_range: Option<String>,
    pub service_account: Option<String>,
    pub service_account_file: Option<PathBuf>,
    pub crm_api_key: Option<String>,
    pub crm_base_url: Option<Url>,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    overrides: ConfigOverrides,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, overrides: ConfigOverrides) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            overrides,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file, if it exists
    /// 2. Apply CLI/environment overrides
    /// 3. Validate the configuration
    /// 4. Resolve credentials and build the runtime configuration
    pub fn load(&self) -> Result<RuntimeConfig, ConfigError> {
        let mut file_config = match std::fs::read_to_string(&self.config_path) {
            Ok(content) => {
                tracing::info!("Configuration loaded from {:?}", self.config_path);
                toml::from_str(&content)?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(
                    "No config file at {:?}, using defaults and environment",
                    self.config_path
                );
                FileConfig::default()
            }
            Err(e) => return Err(e.into()),
        };

        self.apply_overrides(&mut file_config);
        validate(&file_config)?;
        build_runtime_config(file_config)
    }

    fn apply_overrides(&self, config: &mut FileConfig) {
        let o = &self.overrides;
        if let Some(listen) = o.listen {
            config.server.listen = listen;
        }
        if let Some(id) = &o.sheet_id {
            config.sheets.spreadsheet_id = Some(id.clone());
        }
        if let Some(range) = &o.sheet_range {
            config.sheets.range = Some(range.clone());
        }
        // Either credentials override replaces both file settings.
        if let Some(json) = &o.service_account {
            config.sheets.credentials = Some(json.clone());
            config.sheets.credentials_file = None;
        } else if let Some(path) = &o.service_account_file {
            config.sheets.credentials_file = Some(path.clone());
            config.sheets.credentials = None;
        }
        if let Some(key) = &o.crm_api_key {
            config.crm.api_key = Some(key.clone());
        }
        if let Some(url) = &o.crm_base_url {
            config.crm.base_url = Some(url.clone());
        }
    }
}

fn validate(config: &FileConfig) -> Result<(), ConfigError> {
    if let Some(columns) = &config.ingest.columns {
        if columns.is_empty() {
            return Err(ConfigError::ValidationError(
                "ingest.columns must not be empty".to_string(),
            ));
        }
        if let Some(blank) = columns.iter().position(|c| c.trim().is_empty()) {
            return Err(ConfigError::ValidationError(format!(
                "ingest.columns[{blank}] is blank"
            )));
        }
    }
    if config.sheets.credentials.is_some() && config.sheets.credentials_file.is_some() {
        return Err(ConfigError::ValidationError(
            "set only one of sheets.credentials and sheets.credentials_file".to_string(),
        ));
    }
    Ok(())
}

/// Turn a validated file config into the runtime configuration.
///
/// The row-sink needs both a spreadsheet id and usable credentials; the CRM
/// needs an API key. Anything less disables that integration.
fn build_runtime_config(file_config: FileConfig) -> Result<RuntimeConfig, ConfigError> {
    let FileConfig {
        server,
        ingest,
        sheets,
        crm,
    } = file_config;

    let schema = ingest.columns.map(RowSchema::new).unwrap_or_default();
    let ingest = IngestConfig {
        profile: Profile {
            shape: ingest.shape,
            naming: ingest.naming,
        },
        schema,
    };

    let credentials = load_credentials(&sheets).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Service account credentials unusable, row-sink disabled");
        None
    });
    let spreadsheet_id = sheets.spreadsheet_id.filter(|id| !id.trim().is_empty());

    let sheets = match (spreadsheet_id, credentials) {
        (Some(spreadsheet_id), Some(credentials)) => Some(SheetsConfig {
            spreadsheet_id,
            range: sheets
                .range
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SHEET_RANGE.to_string()),
            credentials,
            base_url: match sheets.base_url {
                Some(url) => url,
                None => Url::parse(DEFAULT_SHEETS_BASE_URL)?,
            },
        }),
        (Some(_), None) => {
            tracing::warn!("Spreadsheet id set but no credentials, row-sink disabled");
            None
        }
        (None, Some(_)) => {
            tracing::warn!("Credentials set but no spreadsheet id, row-sink disabled");
            None
        }
        (None, None) => None,
    };

    let crm = match crm.api_key.filter(|k| !k.trim().is_empty()) {
        Some(api_key) => Some(CrmConfig {
            api_key,
            base_url: match crm.base_url {
                Some(url) => url,
                None => Url::parse(DEFAULT_CRM_BASE_URL)?,
            },
            source: crm
                .source
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CONTACT_SOURCE.to_string()),
        }),
        None => None,
    };

    Ok(RuntimeConfig {
        server: ServerConfig {
            listen: server.listen,
        },
        ingest,
        sheets,
        crm,
    })
}

/// Read the service-account key from the inline JSON or the key file.
fn load_credentials(
    sheets: &file::SheetsConfig,
) -> Result<Option<ServiceAccountKey>, ConfigError> {
    let json = match (&sheets.credentials, &sheets.credentials_file) {
        (Some(json), _) => json.clone(),
        (None, Some(path)) => {
            std::fs::read_to_string(path).map_err(|source| ConfigError::CredentialsFile {
                path: path.clone(),
                source,
            })?
        }
        (None, None) => return Ok(None),
    };
    Ok(Some(ServiceAccountKey::from_json(&json)?))
}
