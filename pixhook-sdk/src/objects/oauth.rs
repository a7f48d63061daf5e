//! OAuth 2.0 token endpoint bodies for the JWT-bearer grant.

use serde::Deserialize;

/// `grant_type` value for exchanging a signed JWT assertion.
pub const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: i64,
    #[serde(default)]
    pub token_type: String,
}

fn default_expires_in() -> i64 {
    3600
}
