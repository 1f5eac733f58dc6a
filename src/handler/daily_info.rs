//! Remote info responder
//!
//! Fetches a JSON document from the configured upstream endpoint and relays
//! it as the response body. Connection errors, non-2xx statuses, and
//! undecodable bodies all collapse into the generic 500 page; the detail
//! survives only in the published error event. No retries, no timeout.

use crate::config::AppState;
use crate::events::EventKind;
use crate::http;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(StatusCode),
}

/// Serve the daily information document.
///
/// Publishes `Served daily information` on success, or
/// `Failed to fetch daily information: <detail>` on any failure.
pub async fn serve(state: &AppState) -> Response<Full<Bytes>> {
    match fetch(&state.client, &state.config.upstream.url).await {
        Ok(body) => {
            state.bus.publish(EventKind::Log, "Served daily information");
            http::build_json_response(body)
        }
        Err(err) => {
            state.bus.publish(
                EventKind::Error,
                &format!("Failed to fetch daily information: {err}"),
            );
            http::build_500_response()
        }
    }
}

/// GET the upstream document and re-serialize it as JSON text.
///
/// A response that decodes as JSON is the success criterion; everything
/// else is a fetch failure.
async fn fetch(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    let document: serde_json::Value = response.json().await?;
    Ok(document.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, LoggingConfig, RoutesConfig, ServerConfig, UpstreamConfig};
    use crate::events::recording::Recorder;
    use crate::events::EventBus;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn test_state(url: String) -> (AppState, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let mut bus = EventBus::new();
        bus.subscribe(EventKind::Log, recorder.clone());
        bus.subscribe(EventKind::Error, recorder.clone());

        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            logging: LoggingConfig {
                dir: "logs".to_string(),
            },
            upstream: UpstreamConfig { url },
            routes: RoutesConfig::default(),
        };

        let state = AppState {
            config,
            bus,
            client: reqwest::Client::new(),
        };
        (state, recorder)
    }

    /// One-shot upstream stub: accepts a single connection, reads the
    /// request head, and writes a canned HTTP response.
    async fn stub_upstream(status_line: &'static str, body: &'static str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0_u8; 1024];
            let _ = stream.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_relays_upstream_json() {
        let url = stub_upstream("200 OK", r#"{"date":"2024-03-07","rates":{"EUR":0.92}}"#).await;
        let (state, recorder) = test_state(url);

        let response = serve(&state).await;

        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["Content-Type"], "application/json");
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let document: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(document, json!({"date": "2024-03-07", "rates": {"EUR": 0.92}}));
        assert_eq!(
            recorder.events(),
            vec![(EventKind::Log, "Served daily information".to_string())]
        );
    }

    #[tokio::test]
    async fn test_non_2xx_upstream_is_500() {
        let url = stub_upstream("503 Service Unavailable", "{}").await;
        let (state, recorder) = test_state(url);

        let response = serve(&state).await;

        assert_eq!(response.status(), 500);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"<h1>500 Internal Server Error</h1>");
        let events = recorder.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, EventKind::Error);
        assert!(events[0]
            .1
            .starts_with("Failed to fetch daily information: upstream returned status 503"));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_500() {
        let (state, recorder) = test_state("http://127.0.0.1:9/latest/USD".to_string());

        let response = serve(&state).await;

        assert_eq!(response.status(), 500);
        let events = recorder.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, EventKind::Error);
        assert!(events[0].1.starts_with("Failed to fetch daily information: "));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_500() {
        let url = stub_upstream("200 OK", "daily info, but not json").await;
        let (state, recorder) = test_state(url);

        let response = serve(&state).await;

        assert_eq!(response.status(), 500);
        let events = recorder.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, EventKind::Error);
    }
}
