//! Reading loosely-structured pixel payloads.
//!
//! Events arrive as arbitrary JSON trees. [`path`] walks them safely,
//! [`profile`] decides how a request body becomes a list of events, and
//! [`fields`] flattens one event into the logical fields a row is built from.

pub mod fields;
pub mod path;
pub mod profile;

pub use fields::{EVENT_FIELDS, FieldMap, RESOLUTION_FIELDS, stringify};
pub use path::{Lookup, get_or, lookup};
pub use profile::{PayloadShape, Profile, ResolutionNaming};
