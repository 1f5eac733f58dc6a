//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: publishes the requested URL,
//! matches it against the fixed route table, and dispatches to a responder.

use crate::config::{AppState, RouteTarget};
use crate::events::EventKind;
use crate::handler::{daily_info, static_files};
use crate::http;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Main entry point for HTTP request handling.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let target = request_target(&req);
    Ok(dispatch(&target, &state).await)
}

/// The raw request target: path plus any query string.
///
/// The route table is matched against this string as-is, so a URL carrying
/// a query string falls through to 404.
fn request_target<B>(req: &Request<B>) -> String {
    req.uri()
        .path_and_query()
        .map_or_else(|| req.uri().path().to_owned(), |pq| pq.as_str().to_owned())
}

/// Publish the requested URL, match it against the route table, and respond.
///
/// The `Requested URL` event fires unconditionally, before dispatch; every
/// request therefore produces it plus exactly one outcome event from the
/// selected responder.
pub async fn dispatch(target: &str, state: &AppState) -> Response<Full<Bytes>> {
    state
        .bus
        .publish(EventKind::Log, &format!("Requested URL: {target}"));

    match state.config.routes.lookup(target) {
        Some(RouteTarget::View { file, content_type }) => {
            static_files::serve_view(file, content_type, &state.bus).await
        }
        Some(RouteTarget::DailyInfo) => daily_info::serve(state).await,
        None => {
            state
                .bus
                .publish(EventKind::Error, &format!("404 Not Found: {target}"));
            http::build_404_response()
        }
    }
}
