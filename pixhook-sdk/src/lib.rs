//! Shared types and clients for pixhook.
//!
//! * [`objects`] – request/response bodies for the Sheets values API, the
//!   OAuth token endpoint and the CRM contacts API.
//! * [`service_account`] – Google service-account keys and RS256 JWT
//!   assertions.
//! * [`client`] – typed HTTP clients (behind the `client` feature).

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

#[cfg(feature = "client")]
pub mod client;
pub mod objects;
pub mod service_account;
