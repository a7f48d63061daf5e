#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod config;
pub mod lead;
pub mod payload;
pub mod processors;
pub mod row;
pub mod sinks;
