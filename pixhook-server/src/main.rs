//! pixhook server
//!
//! Receives tracking-pixel webhooks, logs each event as a spreadsheet row and
//! optionally syncs identified visitors to a CRM.

mod api;
mod config;
mod server;
mod shutdown;
mod state;

use clap::Parser;
use config::{ConfigLoader, ConfigOverrides};
use server::{build_router, run_server};
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

/// pixhook - tracking pixel webhook receiver
#[derive(Parser, Debug)]
#[command(name = "pixhook-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (optional; defaults apply if absent)
    #[arg(short, long, env = "PIXHOOK_CONFIG", default_value = "./pixhook-config.toml")]
    config: PathBuf,

    /// Override the listen address (e.g., 0.0.0.0:3000)
    #[arg(short, long, env = "PIXHOOK_LISTEN")]
    listen: Option<SocketAddr>,

    /// Emit logs as JSON lines
    #[arg(long, env = "PIXHOOK_LOG_JSON")]
    log_json: bool,

    /// Target spreadsheet id
    #[arg(long, env = "PIXHOOK_SHEET_ID")]
    sheet_id: Option<String>,

    /// Sheet name or A1 range to append to
    #[arg(long, env = "PIXHOOK_SHEET_RANGE")]
    sheet_range: Option<String>,

    /// Service-account key as inline JSON
    #[arg(long, env = "PIXHOOK_SERVICE_ACCOUNT", hide_env_values = true)]
    service_account: Option<String>,

    /// Path to a service-account key JSON file
    #[arg(long, env = "PIXHOOK_SERVICE_ACCOUNT_FILE")]
    service_account_file: Option<PathBuf>,

    /// CRM API key
    #[arg(long, env = "PIXHOOK_CRM_API_KEY", hide_env_values = true)]
    crm_api_key: Option<String>,

    /// CRM API base URL
    #[arg(long, env = "PIXHOOK_CRM_BASE_URL")]
    crm_base_url: Option<Url>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            listen: self.listen,
            sheet_id: self.sheet_id.clone(),
            sheet_range: self.sheet_range.clone(),
            service_account: self.service_account.clone(),
            service_account_file: self.service_account_file.clone(),
            crm_api_key: self.crm_api_key.clone(),
            crm_base_url: self.crm_base_url.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing
    init_tracing(args.log_json);

    tracing::info!("Starting pixhook-server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_loader = ConfigLoader::new(&args.config, args.overrides());
    let config = config_loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;

    let listen_addr = config.server.listen;

    // Create application state (sinks are built here)
    let state = AppState::from_config(&config).map_err(|e| {
        tracing::error!("Failed to initialize sinks: {}", e);
        e
    })?;

    // Build the router
    let router = build_router(state);

    // Run the server
    tracing::info!("Starting HTTP server on {}", listen_addr);
    let result = run_server(router, listen_addr).await;
    tracing::info!("Server shutdown complete");

    result.map_err(Into::into)
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower=warn,hyper=warn"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
