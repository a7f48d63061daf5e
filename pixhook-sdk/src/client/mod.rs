//! HTTP clients for the row-sink (Google Sheets) and the CRM-sink.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need the shared types do not pull in `reqwest`.

mod crm;
mod sheets;

pub use crm::{CrmClient, DEFAULT_CRM_BASE_URL};
pub use sheets::{DEFAULT_SHEETS_BASE_URL, SheetsClient};

use reqwest::StatusCode;
use url::Url;

use crate::service_account::ServiceAccountError;

/// Timeout applied to every outbound request.
pub const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Errors produced by the SDK HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, connection reset, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service-account assertion could not be built.
    #[error("service account error: {0}")]
    ServiceAccount(#[from] ServiceAccountError),

    /// The server returned a non-2xx status code.
    #[error("api error: status {status}, body: {body}")]
    Api { status: StatusCode, body: String },

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

/// Build the shared `reqwest::Client` used by both sinks.
pub fn default_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Ensure `base_url` ends in `/` so relative endpoints join beneath its path
/// instead of replacing the last segment.
fn with_trailing_slash(mut base_url: Url) -> Url {
    if !base_url.path().ends_with('/') {
        let path = format!("{}/", base_url.path());
        base_url.set_path(&path);
    }
    base_url
}

/// Return the body as `T` on 2xx, otherwise a [`ClientError::Api`].
async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        return Err(ClientError::Api { status, body: text });
    }
    Ok(serde_json::from_str(&text)?)
}

/// Discard the body on 2xx, otherwise a [`ClientError::Api`].
async fn expect_success(resp: reqwest::Response) -> Result<(), ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(());
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::Api { status, body })
}
