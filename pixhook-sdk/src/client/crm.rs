//! CRM contacts client (CRM-sink).

use reqwest::{Client, StatusCode};
use url::Url;

use super::{ClientError, default_http_client, expect_success, parse_response, with_trailing_slash};
use crate::objects::{
    ContactEnvelope, ContactLookupResponse, ContactRef, CreateContactRequest, CreateNoteRequest,
};

/// Default contacts API root.
pub const DEFAULT_CRM_BASE_URL: &str = "https://rest.gohighlevel.com/v1/";

/// Typed client for the contact directory, authenticated with a bearer key.
#[derive(Clone)]
pub struct CrmClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

impl std::fmt::Debug for CrmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrmClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl CrmClient {
    /// Create a new `CrmClient`.
    ///
    /// A trailing slash is added to `base_url` so relative endpoints join
    /// beneath it instead of replacing its last segment.
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            http: default_http_client(),
            base_url: with_trailing_slash(base_url),
            api_key: api_key.into(),
        }
    }

    /// Replace the default `reqwest::Client`.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /contacts/lookup` – find a contact by email and/or phone.
    ///
    /// Returns `Ok(None)` when the directory has no match.
    pub async fn lookup_contact(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Option<ContactRef>, ClientError> {
        let mut url = self.base_url.join("contacts/lookup")?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(email) = email {
                query.append_pair("email", email);
            }
            if let Some(phone) = phone {
                query.append_pair("phone", phone);
            }
        }

        let resp = self.http.get(url).bearer_auth(&self.api_key).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let found: ContactLookupResponse = parse_response(resp).await?;
        Ok(found.contacts.into_iter().next())
    }

    /// `POST /contacts/` – create a contact.
    pub async fn create_contact(
        &self,
        contact: &CreateContactRequest,
    ) -> Result<ContactRef, ClientError> {
        let url = self.base_url.join("contacts/")?;
        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(contact)
            .send()
            .await?;

        let created: ContactEnvelope = parse_response(resp).await?;
        Ok(created.contact)
    }

    /// `POST /contacts/{id}/notes/` – attach a note to a contact.
    pub async fn add_note(&self, contact_id: &str, body: &str) -> Result<(), ClientError> {
        let url = self
            .base_url
            .join(&format!("contacts/{}/notes/", urlencoding::encode(contact_id)))?;
        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&CreateNoteRequest {
                body: body.to_string(),
            })
            .send()
            .await?;

        expect_success(resp).await
    }
}
