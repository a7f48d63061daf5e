//! EventIngestor processor.
//!
//! The EventIngestor is responsible for:
//! - Splitting a request payload into events according to the profile
//! - Flattening each event and projecting it onto the row schema
//! - Syncing qualified leads to the CRM-sink, one event at a time
//! - Appending the whole batch to the row-sink in a single call
//!
//! Sink failures are logged and recorded in the [`IngestReport`]; they never
//! surface as an error, so the HTTP layer can always answer 204.

use std::convert::Infallible;
use std::sync::Arc;

use kanau::processor::Processor;
use pixhook_sdk::objects::CreateContactRequest;
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{DEFAULT_CONTACT_SOURCE, IngestConfig};
use crate::lead::{LeadRecord, activity_note};
use crate::payload::{FieldMap, Profile};
use crate::row::RowSchema;
use crate::sinks::{CrmSink, RowSink};

/// One inbound request: query parameters and body already merged.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestRequest {
    pub payload: Value,
}

/// What happened to the batch of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowsOutcome {
    /// No rows, or no row-sink configured.
    Skipped,
    /// The row-sink accepted this many rows.
    Appended(u64),
    /// The row-sink call failed.
    Failed,
}

/// What happened for one event on the CRM side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadOutcome {
    /// Missing name, or neither email nor phone.
    NotQualified,
    /// An existing contact got an activity note.
    Noted { contact_id: String },
    /// A new contact was created.
    Created { contact_id: String },
    /// A CRM call failed; see the logs.
    Failed,
}

/// Summary of one ingest, for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub events: usize,
    pub rows: RowsOutcome,
    /// One entry per event when CRM sync is enabled, empty otherwise.
    pub leads: Vec<LeadOutcome>,
}

impl IngestReport {
    fn empty() -> Self {
        Self {
            events: 0,
            rows: RowsOutcome::Skipped,
            leads: Vec::new(),
        }
    }
}

/// CRM side-channel: the sink plus the source tag for new contacts.
struct CrmSync {
    sink: Arc<dyn CrmSink>,
    source: String,
}

/// Turns pixel payloads into sheet rows and CRM updates.
pub struct EventIngestor {
    profile: Profile,
    schema: RowSchema,
    row_sink: Option<Arc<dyn RowSink>>,
    crm: Option<CrmSync>,
}

impl EventIngestor {
    /// Create an ingestor with no sinks attached.
    pub fn new(config: IngestConfig) -> Self {
        Self {
            profile: config.profile,
            schema: config.schema,
            row_sink: None,
            crm: None,
        }
    }

    /// Attach the row-sink.
    pub fn with_row_sink(mut self, sink: Arc<dyn RowSink>) -> Self {
        self.row_sink = Some(sink);
        self
    }

    /// Enable CRM sync; `source` tags newly created contacts.
    pub fn with_crm(mut self, sink: Arc<dyn CrmSink>, source: impl Into<String>) -> Self {
        let source = source.into();
        self.crm = Some(CrmSync {
            sink,
            source: if source.is_empty() {
                DEFAULT_CONTACT_SOURCE.to_string()
            } else {
                source
            },
        });
        self
    }

    pub fn row_sink_enabled(&self) -> bool {
        self.row_sink.is_some()
    }

    pub fn crm_enabled(&self) -> bool {
        self.crm.is_some()
    }

    async fn append(&self, rows: Vec<Vec<String>>) -> RowsOutcome {
        let Some(sink) = &self.row_sink else {
            debug!(rows = rows.len(), "Row-sink not configured, skipping append");
            return RowsOutcome::Skipped;
        };
        if rows.is_empty() {
            return RowsOutcome::Skipped;
        }

        let submitted = rows.len();
        match sink.append_rows(rows).await {
            Ok(appended) => {
                info!(rows = appended, "Rows appended");
                RowsOutcome::Appended(appended)
            }
            Err(e) => {
                warn!(error = %e, rows = submitted, "Row append failed");
                RowsOutcome::Failed
            }
        }
    }
}

impl CrmSync {
    /// Look up the lead and either annotate or create the contact.
    async fn sync(&self, fields: &FieldMap) -> LeadOutcome {
        let lead = LeadRecord::from_fields(fields);
        if !lead.is_qualified() {
            return LeadOutcome::NotQualified;
        }
        let (email, phone) = (lead.email(), lead.phone());
        if email.is_none() && phone.is_none() {
            return LeadOutcome::NotQualified;
        }

        let existing = match self.sink.find_contact(email, phone).await {
            Ok(existing) => existing,
            Err(e) => {
                warn!(error = %e, "CRM contact lookup failed");
                return LeadOutcome::Failed;
            }
        };

        match existing {
            Some(contact_id) => match self.sink.add_note(&contact_id, &activity_note(fields)).await
            {
                Ok(()) => {
                    info!(%contact_id, "Note added to existing contact");
                    LeadOutcome::Noted { contact_id }
                }
                Err(e) => {
                    warn!(%contact_id, error = %e, "Failed to add note to contact");
                    LeadOutcome::Failed
                }
            },
            None => {
                let request = CreateContactRequest {
                    first_name: lead.first_name,
                    last_name: lead.last_name,
                    email: lead.email,
                    phone: lead.phone,
                    source: self.source.clone(),
                };
                match self.sink.create_contact(&request).await {
                    Ok(contact_id) => {
                        info!(%contact_id, "Contact created");
                        LeadOutcome::Created { contact_id }
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to create contact");
                        LeadOutcome::Failed
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Processor trait implementation
// ---------------------------------------------------------------------------

impl Processor<IngestRequest> for EventIngestor {
    type Output = IngestReport;
    type Error = Infallible;

    #[tracing::instrument(skip_all, name = "ingest", fields(request_id = %Uuid::new_v4()))]
    async fn process(&self, request: IngestRequest) -> Result<IngestReport, Infallible> {
        let events = self.profile.shape.events(request.payload);
        if events.is_empty() {
            debug!("No events in payload");
            return Ok(IngestReport::empty());
        }

        let mut rows = Vec::with_capacity(events.len());
        let mut leads = Vec::new();

        for event in &events {
            let fields = FieldMap::extract(event, &self.profile);
            debug!(
                event_type = fields.get("event_type"),
                fields = fields.len(),
                "Event flattened"
            );
            rows.push(self.schema.project(&fields).into_cells());

            if let Some(crm) = &self.crm {
                leads.push(crm.sync(&fields).await);
            }
        }

        let rows = self.append(rows).await;
        Ok(IngestReport {
            events: events.len(),
            rows,
            leads,
        })
    }
}
