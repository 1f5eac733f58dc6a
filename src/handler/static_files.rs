//! Static file responder
//!
//! Reads a view file from disk and writes it back as the response body.
//! Exactly one response per call; no partial or streamed responses.

use crate::events::{EventBus, EventKind};
use crate::http;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

/// Serve one file with the configured content type.
///
/// Publishes `Served: <path>` on success. Any read failure — missing file,
/// permission error — collapses into the generic 500 page and an
/// `500 Internal Server Error: <path>` event; the failure kind is not
/// distinguished.
pub async fn serve_view(path: &str, content_type: &str, bus: &EventBus) -> Response<Full<Bytes>> {
    match fs::read(path).await {
        Ok(data) => {
            bus.publish(EventKind::Log, &format!("Served: {path}"));
            http::build_file_response(data, content_type)
        }
        Err(_) => {
            bus.publish(
                EventKind::Error,
                &format!("500 Internal Server Error: {path}"),
            );
            http::build_500_response()
        }
    }
}
