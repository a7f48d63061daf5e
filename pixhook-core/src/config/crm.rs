//! CRM-sink configuration.

use url::Url;

/// Source tag attached to contacts created from pixel events.
pub const DEFAULT_CONTACT_SOURCE: &str = "Website Pixel";

#[derive(Clone)]
pub struct CrmConfig {
    /// Bearer key for the contacts API.
    pub api_key: String,
    /// Root of the contacts API.
    pub base_url: Url,
    /// Value of the `source` field on created contacts.
    pub source: String,
}

impl std::fmt::Debug for CrmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrmConfig")
            .field("base_url", &self.base_url.as_str())
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
