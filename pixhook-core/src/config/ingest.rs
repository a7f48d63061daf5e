//! Ingest configuration.

use crate::payload::Profile;
use crate::row::RowSchema;

/// How inbound payloads are read and which columns each row carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestConfig {
    pub profile: Profile,
    pub schema: RowSchema,
}
