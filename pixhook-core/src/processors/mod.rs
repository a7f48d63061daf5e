//! Request processors.
//!
//! - `EventIngestor`: receives an `IngestRequest`, writes rows and CRM updates

pub mod ingestor;

pub use ingestor::{EventIngestor, IngestReport, IngestRequest, LeadOutcome, RowsOutcome};
