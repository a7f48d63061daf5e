use axum::{extract::State, http::StatusCode};
use kanau::processor::Processor;
use pixhook_core::processors::IngestRequest;

use super::extractors::PixelPayload;
use crate::state::AppState;

/// `GET|POST /pixel`: ingest one pixel request.
///
/// Ingestion runs on its own task so a client that disconnects mid-request
/// (a beacon fired on page unload) does not cancel the sink calls. Sink
/// outcomes are logged by the ingestor; the caller only ever sees 204.
pub(super) async fn ingest_pixel(
    State(state): State<AppState>,
    PixelPayload(payload): PixelPayload,
) -> StatusCode {
    let ingestor = state.ingestor.clone();
    let task = tokio::spawn(async move { ingestor.process(IngestRequest { payload }).await });

    match task.await {
        Ok(Ok(report)) => tracing::debug!(
            events = report.events,
            rows = ?report.rows,
            leads = report.leads.len(),
            "Pixel request handled"
        ),
        Ok(Err(never)) => match never {},
        Err(e) => tracing::error!(error = %e, "Ingest task failed"),
    }
    StatusCode::NO_CONTENT
}
