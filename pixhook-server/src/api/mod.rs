//! Pixel API.
//!
//! # Endpoints
//!
//! - `GET  /pixel` – ingest a pixel event
//! - `POST /pixel` – ingest a pixel event (identical to GET)
//!
//! Both always answer `204 No Content`.

use axum::{Router, routing::get};

use crate::state::AppState;

mod extractors;
mod pixel;

/// Build the pixel API router.
pub fn router() -> Router<AppState> {
    Router::new().route("/pixel", get(pixel::ingest_pixel).post(pixel::ingest_pixel))
}
