//! [`CrmSink`] over the CRM contacts client.

use async_trait::async_trait;
use pixhook_sdk::client::CrmClient;
use pixhook_sdk::objects::CreateContactRequest;

use super::{CrmSink, SinkError};

#[async_trait]
impl CrmSink for CrmClient {
    async fn find_contact(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Option<String>, SinkError> {
        let found = self.lookup_contact(email, phone).await?;
        Ok(found.map(|contact| contact.id))
    }

    async fn create_contact(&self, contact: &CreateContactRequest) -> Result<String, SinkError> {
        let created = CrmClient::create_contact(self, contact).await?;
        if created.id.is_empty() {
            return Err(SinkError::Unexpected(
                "created contact has no id".to_string(),
            ));
        }
        Ok(created.id)
    }

    async fn add_note(&self, contact_id: &str, body: &str) -> Result<(), SinkError> {
        CrmClient::add_note(self, contact_id, body).await?;
        Ok(())
    }
}
