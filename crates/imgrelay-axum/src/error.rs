//! Adapter error types and their HTTP mappings.
//!
//! The proxy speaks plain text on the error path, matching the original
//! service; per-candidate fetch detail never leaves the logs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use imgrelay_core::InvalidImageId;

/// Errors a request can fail with before or outside the race.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Malformed request (invalid or empty identifier).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, message).into_response()
    }
}

impl From<InvalidImageId> for HttpError {
    fn from(err: InvalidImageId) -> Self {
        Self::BadRequest(format!("Invalid ID: {err}"))
    }
}
