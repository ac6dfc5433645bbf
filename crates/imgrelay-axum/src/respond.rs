//! Race result to HTTP response mapping.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use imgrelay_core::RaceResult;

/// Cache policy for successfully proxied images.
const CACHE_CONTROL: &str = "public, max-age=3600";

/// Body served when no candidate resolved.
const NOT_FOUND_BODY: &str = "Image not found";

/// Total mapping from a race result to the outbound response.
///
/// `Found` becomes 200 with the winning format's MIME type and a one-hour
/// public cache header; `NotFound` becomes a plain-text 404, whether the
/// race failed everywhere or ran out of time.
pub fn to_response(result: RaceResult) -> Response {
    match result {
        RaceResult::Found { bytes, format } => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, format.mime_type()),
                (header::CACHE_CONTROL, CACHE_CONTROL),
            ],
            bytes,
        )
            .into_response(),
        RaceResult::NotFound => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/plain")],
            NOT_FOUND_BODY,
        )
            .into_response(),
    }
}
