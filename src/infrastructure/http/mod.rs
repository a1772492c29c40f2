//! HTTP backend - POSTs relay requests with Basic auth

use async_trait::async_trait;
use reqwest::Client;

use crate::application::errors::{RelayError, TransportKind};
use crate::domain::entities::OutboundRequest;
use crate::domain::traits::{Backend, BackendResponse};

/// reqwest-backed backend. Uses the client's default timeout behaviour.
pub struct HttpBackend {
    client: Client,
}

impl HttpBackend {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn send(&self, request: &OutboundRequest) -> Result<BackendResponse, RelayError> {
        let response = self
            .client
            .post(&request.target_url)
            .basic_auth(&request.credentials.username, Some(&request.credentials.password))
            .json(&request.body.to_json())
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Status {
                status: status.as_u16(),
                status_text,
                body,
            });
        }

        Ok(BackendResponse {
            status: status.as_u16(),
            status_text,
        })
    }
}

fn transport_error(e: reqwest::Error) -> RelayError {
    let kind = if e.is_timeout() {
        TransportKind::Timeout
    } else if e.is_connect() {
        TransportKind::Connect
    } else {
        TransportKind::Other
    };
    let e = e.without_url();

    let mut causes = Vec::new();
    let mut source = std::error::Error::source(&e);
    while let Some(cause) = source {
        causes.push(cause.to_string());
        source = cause.source();
    }

    // reqwest's Display omits the root cause; keep the deepest one visible
    let message = match causes.last() {
        Some(root) => format!("{}: {}", e, root),
        None => e.to_string(),
    };

    RelayError::Transport { kind, message, causes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Credentials, RelayParameters, RequestBody};
    use httpmock::prelude::*;
    use std::time::Duration;

    fn research_request(url: String) -> OutboundRequest {
        OutboundRequest::new(
            url,
            RequestBody::Research(RelayParameters::new("AI", None, None).unwrap()),
            Credentials::new("u", "p"),
        )
    }

    #[tokio::test]
    async fn test_posts_json_with_basic_auth() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/research")
                    .header("authorization", "Basic dTpw")
                    .json_body(serde_json::json!({ "trend_topic": "AI", "count": 1, "lang": "english" }));
                then.status(200).body("ok");
            })
            .await;

        let backend = HttpBackend::new();
        let response = backend.send(&research_request(server.url("/research"))).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.status_text, "OK");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_body_variant() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/start").json_body(serde_json::json!({}));
                then.status(202);
            })
            .await;

        let request = OutboundRequest::new(server.url("/start"), RequestBody::Empty, Credentials::new("u", "p"));
        let response = HttpBackend::new().send(&request).await.unwrap();

        assert_eq!(response.status, 202);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_2xx_is_status_error() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/research");
                then.status(500).body(r#"{"error":"boom"}"#);
            })
            .await;

        let err = HttpBackend::new()
            .send(&research_request(server.url("/research")))
            .await
            .unwrap_err();

        match &err {
            RelayError::Status { status, status_text, body } => {
                assert_eq!(*status, 500);
                assert_eq!(status_text, "Internal Server Error");
                assert_eq!(body, r#"{"error":"boom"}"#);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.to_string(), "Request failed with status code 500");
        assert_eq!(mock.hits_async().await, 1);
    }

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/research");
                then.status(200).delay(Duration::from_millis(500));
            })
            .await;

        let client = Client::builder().timeout(Duration::from_millis(50)).build().unwrap();
        let err = HttpBackend::with_client(client)
            .send(&research_request(server.url("/research")))
            .await
            .unwrap_err();

        assert!(
            matches!(err, RelayError::Transport { kind: TransportKind::Timeout, .. }),
            "expected timeout, got {:?}",
            err
        );
        assert_eq!(err.code(), Some("ETIMEDOUT"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Port 9 (discard) is closed on test hosts
        let err = HttpBackend::new()
            .send(&research_request("http://127.0.0.1:9/research".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, RelayError::Transport { .. }));
        assert!(!err.to_string().contains("Basic"));
    }
}
