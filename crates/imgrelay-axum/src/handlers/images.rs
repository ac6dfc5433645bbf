//! Image proxy handlers.

use axum::extract::{Path, State};
use axum::response::Response;

use imgrelay_core::{ImageId, RaceResult};

use crate::error::HttpError;
use crate::respond;
use crate::state::AppState;

/// `GET /{id}` - race all format variants upstream, serve the winner.
///
/// The identifier is validated before any upstream I/O happens; an invalid
/// one never reaches the race.
pub async fn serve(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, HttpError> {
    let id = ImageId::parse(&raw_id)?;
    tracing::info!(id = %id, "image requested");

    let candidates = state.resolver.resolve(&id);
    let result = state.coordinator.race(candidates).await;

    match &result {
        RaceResult::Found { format, bytes } => {
            tracing::info!(id = %id, format = %format, size = bytes.len(), "serving image");
        }
        RaceResult::NotFound => {
            tracing::info!(id = %id, "image not found");
        }
    }

    Ok(respond::to_response(result))
}

/// `GET /` - an empty identifier is rejected before the core runs.
pub async fn reject_empty_id() -> HttpError {
    HttpError::BadRequest("Invalid ID: image id must not be empty".to_string())
}
