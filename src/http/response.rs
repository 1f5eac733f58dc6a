//! HTTP response building module
//!
//! Builders for the fixed response shapes the server emits, decoupled from
//! the handlers that choose them. Responses carry no headers beyond
//! `Content-Type`.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

const NOT_FOUND_BODY: &str = "<h1>404 Not Found</h1>";
const SERVER_ERROR_BODY: &str = "<h1>500 Internal Server Error</h1>";

/// Build 200 response carrying raw file bytes.
pub fn build_file_response(data: Vec<u8>, content_type: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .body(Full::new(Bytes::from(data)))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 200 response carrying serialized JSON text.
pub fn build_json_response(body: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response.
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/html")
        .body(Full::new(Bytes::from(NOT_FOUND_BODY)))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from(NOT_FOUND_BODY)))
        })
}

/// Build 500 Internal Server Error response.
pub fn build_500_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(500)
        .header("Content-Type", "text/html")
        .body(Full::new(Bytes::from(SERVER_ERROR_BODY)))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::from(SERVER_ERROR_BODY)))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_file_response() {
        let response = build_file_response(b"<html>OK</html>".to_vec(), "text/html");

        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["Content-Type"], "text/html");
        assert_eq!(body_string(response).await, "<html>OK</html>");
    }

    #[tokio::test]
    async fn test_json_response() {
        let response = build_json_response(r#"{"rates":{}}"#.to_string());

        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["Content-Type"], "application/json");
        assert_eq!(body_string(response).await, r#"{"rates":{}}"#);
    }

    #[tokio::test]
    async fn test_404_response() {
        let response = build_404_response();

        assert_eq!(response.status(), 404);
        assert_eq!(response.headers()["Content-Type"], "text/html");
        assert_eq!(body_string(response).await, "<h1>404 Not Found</h1>");
    }

    #[tokio::test]
    async fn test_500_response() {
        let response = build_500_response();

        assert_eq!(response.status(), 500);
        assert_eq!(response.headers()["Content-Type"], "text/html");
        assert_eq!(
            body_string(response).await,
            "<h1>500 Internal Server Error</h1>"
        );
    }
}
