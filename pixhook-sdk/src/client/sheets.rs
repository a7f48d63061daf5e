//! Google Sheets client (row-sink).
//!
//! Access tokens are minted from a service-account key via the JWT-bearer
//! grant and cached until shortly before they expire.

use reqwest::Client;
use tokio::sync::Mutex;
use url::Url;

use super::{ClientError, default_http_client, parse_response, with_trailing_slash};
use crate::objects::{AccessTokenResponse, AppendValuesRequest, AppendValuesResponse, JWT_BEARER_GRANT_TYPE};
use crate::service_account::{SHEETS_SCOPE, ServiceAccountKey};

/// Production Sheets API root.
pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/";

/// Tokens are refreshed this many seconds before their reported expiry.
const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: i64,
}

/// Typed client for appending rows to one spreadsheet range.
#[derive(Debug)]
pub struct SheetsClient {
    http: Client,
    base_url: Url,
    spreadsheet_id: String,
    range: String,
    key: ServiceAccountKey,
    token: Mutex<Option<AccessToken>>,
}

impl SheetsClient {
    /// Create a client targeting `range` (e.g. `Sheet1`) of `spreadsheet_id`.
    pub fn new(
        spreadsheet_id: impl Into<String>,
        range: impl Into<String>,
        key: ServiceAccountKey,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            http: default_http_client(),
            base_url: Url::parse(DEFAULT_SHEETS_BASE_URL)?,
            spreadsheet_id: spreadsheet_id.into(),
            range: range.into(),
            key,
            token: Mutex::new(None),
        })
    }

    /// Replace the default `reqwest::Client`.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// Point the client at a different API root (emulators, proxies).
    /// Any path prefix on `base_url` is kept.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = with_trailing_slash(base_url);
        self
    }

    /// URL of the `values:append` endpoint for the configured range.
    pub fn append_url(&self) -> Result<Url, ClientError> {
        let path = format!(
            "v4/spreadsheets/{}/values/{}:append",
            urlencoding::encode(&self.spreadsheet_id),
            urlencoding::encode(&self.range),
        );
        Ok(self.base_url.join(&path)?)
    }

    /// `POST .../values/{range}:append` – append `rows` after the last
    /// populated row of the range.
    pub async fn append_rows(
        &self,
        rows: Vec<Vec<String>>,
    ) -> Result<AppendValuesResponse, ClientError> {
        let token = self.access_token().await?;
        let url = self.append_url()?;

        let resp = self
            .http
            .post(url)
            .bearer_auth(token)
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&AppendValuesRequest { values: rows })
            .send()
            .await?;

        parse_response(resp).await
    }

    /// Return a cached access token, minting a new one when needed.
    async fn access_token(&self) -> Result<String, ClientError> {
        let now = time::OffsetDateTime::now_utc().unix_timestamp();
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref()
            && token.expires_at.saturating_sub(TOKEN_REFRESH_MARGIN_SECS) > now
        {
            return Ok(token.value.clone());
        }

        tracing::debug!(client_email = %self.key.client_email, "Requesting Sheets access token");
        let assertion = self.key.sign_assertion(SHEETS_SCOPE, now)?;
        let resp = self
            .http
            .post(&self.key.token_uri)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT_TYPE),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;
        let token: AccessTokenResponse = parse_response(resp).await?;

        let value = token.access_token.clone();
        *cached = Some(AccessToken {
            value: token.access_token,
            expires_at: now.saturating_add(token.expires_in),
        });
        Ok(value)
    }
}
