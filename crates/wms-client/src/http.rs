//! # HTTP Wrapper
//!
//! One function shape for every backend call: send, check the status, decode.
//!
//! ## Response Handling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Response → Result                                │
//! │                                                                         │
//! │  no response           → ClientError::Transport                        │
//! │  204 No Content        → Ok(None)           (body never read)          │
//! │  2xx, empty body       → Ok(None)                                      │
//! │  2xx, JSON body        → Ok(Some(value))                               │
//! │  2xx, other body       → ClientError::Decode                           │
//! │                                                                         │
//! │  non-2xx, JSON body    → Status { message: body.error                  │
//! │                                   ?? body.message                      │
//! │                                   ?? "Failed to fetch data from        │
//! │                                       {url}. Status: {N}" }            │
//! │  non-2xx, other body   → Status { "HTTP error! status: {N}" }          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each call is attempted once. There is no retry and, unless configured,
//! no timeout.

use std::time::{Duration, Instant};

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};

pub use reqwest::Method;

/// Thin wrapper over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Builds a client with an optional per-request timeout.
    pub fn new(timeout: Option<Duration>) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::InvalidConfig(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client))
    }

    /// Wraps an existing client.
    pub fn with_client(client: Client) -> Self {
        HttpClient { client }
    }

    /// Sends one request and applies the status/decoding rules above.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> ClientResult<Option<Value>> {
        let started = Instant::now();

        let mut request = self.client.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(%method, url, error = %e, "API call failed");
                return Err(e.into());
            }
        };

        let status = response.status();
        debug!(
            %method,
            url,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "API call completed"
        );

        if !status.is_success() {
            // An unreadable error body is treated like a non-JSON one.
            let bytes = response.bytes().await.unwrap_or_default();
            let err = status_error(url, status.as_u16(), &bytes);
            warn!(%method, url, status = status.as_u16(), error = %err, "API call rejected");
            return Err(err);
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response.bytes().await?;
        decode_body(&bytes)
    }

    pub async fn get(&self, url: &str) -> ClientResult<Option<Value>> {
        self.request(Method::GET, url, None).await
    }
}

/// Builds the error for a non-2xx response.
pub fn status_error(url: &str, status: u16, body: &[u8]) -> ClientError {
    let message = match serde_json::from_slice::<Value>(body) {
        Ok(json) => ["error", "message"]
            .iter()
            .find_map(|key| {
                json.get(*key)
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("Failed to fetch data from {}. Status: {}", url, status)),
        Err(_) => format!("HTTP error! status: {}", status),
    };
    ClientError::Status { status, message }
}

/// Decodes a 2xx body. Blank bodies are `None`.
pub fn decode_body(body: &[u8]) -> ClientResult<Option<Value>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Ok(Some(serde_json::from_slice(body)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::{http::StatusCode as AxumStatus, routing::get, Json, Router};
    use serde_json::json;

    #[test]
    fn test_status_error_prefers_error_field() {
        let err = status_error(
            "http://x/api/customers",
            409,
            br#"{"error":"Email already exists","message":"ignored"}"#,
        );
        assert_eq!(err.to_string(), "Email already exists");
        assert_eq!(err.status(), Some(409));
    }

    #[test]
    fn test_status_error_falls_back_to_message_then_default() {
        let err = status_error("http://x/api/w", 400, br#"{"message":"Bad input"}"#);
        assert_eq!(err.to_string(), "Bad input");

        let err = status_error("http://x/api/w", 404, br#"{"detail":"nope"}"#);
        assert_eq!(
            err.to_string(),
            "Failed to fetch data from http://x/api/w. Status: 404"
        );
    }

    #[test]
    fn test_status_error_non_json_body() {
        let err = status_error("http://x/api/w", 502, b"<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), "HTTP error! status: 502");

        let err = status_error("http://x/api/w", 500, b"");
        assert_eq!(err.to_string(), "HTTP error! status: 500");
    }

    #[test]
    fn test_decode_body() {
        assert_eq!(decode_body(b"").unwrap(), None);
        assert_eq!(decode_body(b"  \n").unwrap(), None);
        assert_eq!(decode_body(b"null").unwrap(), Some(Value::Null));
        assert_eq!(decode_body(b"[1,2]").unwrap(), Some(json!([1, 2])));
        assert!(matches!(decode_body(b"{oops"), Err(ClientError::Decode(_))));
    }

    #[tokio::test]
    async fn test_request_against_live_server() {
        let router = Router::new()
            .route("/ok", get(|| async { Json(json!([{"id": "1"}])) }))
            .route("/empty", get(|| async { AxumStatus::OK }))
            .route("/gone", get(|| async { AxumStatus::NO_CONTENT }))
            .route(
                "/conflict",
                get(|| async {
                    (
                        AxumStatus::CONFLICT,
                        Json(json!({"error": "Email already exists"})),
                    )
                }),
            )
            .route(
                "/broken",
                get(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "stack trace") }),
            )
            .route("/garbled", get(|| async { "not json" }));
        let base = serve(router).await;
        let http = HttpClient::new(None).unwrap();

        let ok = http.get(&format!("{}/ok", base)).await.unwrap();
        assert_eq!(ok, Some(json!([{"id": "1"}])));

        assert_eq!(http.get(&format!("{}/empty", base)).await.unwrap(), None);
        assert_eq!(http.get(&format!("{}/gone", base)).await.unwrap(), None);

        let err = http.get(&format!("{}/conflict", base)).await.unwrap_err();
        assert_eq!(err.to_string(), "Email already exists");

        let err = http.get(&format!("{}/broken", base)).await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP error! status: 500");

        let err = http.get(&format!("{}/garbled", base)).await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_request_sends_json_body() {
        let router = Router::new().route(
            "/echo",
            axum::routing::post(|Json(body): Json<Value>| async move {
                (AxumStatus::CREATED, Json(body))
            }),
        );
        let base = serve(router).await;
        let http = HttpClient::new(Some(Duration::from_secs(5))).unwrap();

        let body = json!({"name": "Rice", "amount": 42});
        let echoed = http
            .request(Method::POST, &format!("{}/echo", base), Some(&body))
            .await
            .unwrap();
        assert_eq!(echoed, Some(body));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let http = HttpClient::new(None).unwrap();
        let err = http.get(&format!("http://{}/x", addr)).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
        assert!(err.is_network());
    }
}
