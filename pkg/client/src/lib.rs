//! HTTP transport for validated cluster upgrade requests.
//!
//! The client sends one request and reports the outcome. Retrying is left
//! to the caller.

use pkg_constants::network::{API_VERSION, DEFAULT_SERVER_TIMEOUT_SECS, UPGRADE_PATH};
use pkg_types::ClusterUpgradeRequest;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum ClientError {
    /// The cluster answered with a non-success status
    #[error("server returned {status}: {body}")]
    Http {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Connection, TLS or body transfer failure
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The caller cancelled before the cluster answered
    #[error("request cancelled")]
    Cancelled,
}

/// Client for the cluster management endpoint.
#[derive(Debug, Clone)]
pub struct UpgradeClient {
    endpoint: String,
    http: reqwest::Client,
}

impl UpgradeClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_http_client(endpoint, http))
    }

    /// Use a preconfigured `reqwest::Client` (TLS, proxies, auth headers).
    pub fn with_http_client(endpoint: impl Into<String>, http: reqwest::Client) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self { endpoint, http }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn upgrade_url(&self, server_timeout: Option<u64>) -> String {
        format!(
            "{}{}?api-version={}&timeout={}",
            self.endpoint,
            UPGRADE_PATH,
            API_VERSION,
            server_timeout.unwrap_or(DEFAULT_SERVER_TIMEOUT_SECS)
        )
    }

    /// POST the request to start a cluster upgrade.
    ///
    /// `server_timeout` is the number of seconds the cluster may spend on the
    /// operation (60 when `None`). Firing `cancel` aborts the in-flight call.
    pub async fn start_cluster_upgrade(
        &self,
        request: &ClusterUpgradeRequest,
        server_timeout: Option<u64>,
        cancel: &CancellationToken,
    ) -> Result<(), ClientError> {
        let url = self.upgrade_url(server_timeout);
        info!("Starting cluster upgrade via {}", url);

        let send = async {
            let resp = self.http.post(&url).json(request).send().await?;
            let status = resp.status();
            if status.is_success() {
                return Ok(());
            }
            // A body that fails to arrive is a transport error, not an empty reply.
            let body = resp.text().await?;
            Err::<(), _>(ClientError::Http { status, body })
        };

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ClientError::Cancelled),
            res = send => res,
        };

        match &result {
            Ok(()) => info!("Cluster upgrade accepted"),
            Err(ClientError::Cancelled) => info!("Cluster upgrade request cancelled"),
            Err(e) => error!("Cluster upgrade request failed: {}", e),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{RawQuery, State};
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use pkg_types::{FailureAction, UpgradeMode, UpgradeRequestBuilder};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct Captured {
        calls: Arc<Mutex<Vec<(Option<String>, serde_json::Value)>>>,
    }

    async fn accept(
        State(captured): State<Captured>,
        RawQuery(query): RawQuery,
        Json(body): Json<serde_json::Value>,
    ) -> StatusCode {
        captured.calls.lock().unwrap().push((query, body));
        StatusCode::OK
    }

    async fn reject() -> (StatusCode, &'static str) {
        (
            StatusCode::BAD_REQUEST,
            r#"{"Error":{"Code":"FABRIC_E_INVALID_ARGUMENT"}}"#,
        )
    }

    async fn hang() -> StatusCode {
        tokio::time::sleep(Duration::from_secs(30)).await;
        StatusCode::OK
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    fn sample_request() -> ClusterUpgradeRequest {
        UpgradeRequestBuilder::new()
            .code_version("1.0.0")
            .rolling_upgrade_mode(UpgradeMode::Monitored)
            .failure_action(FailureAction::Rollback)
            .health_check_wait_duration("PT30S")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn posts_request_body_with_query() {
        let captured = Captured::default();
        let router = Router::new()
            .route("/$/Upgrade", post(accept))
            .with_state(captured.clone());
        let client = UpgradeClient::new(serve(router).await).unwrap();

        client
            .start_cluster_upgrade(&sample_request(), None, &CancellationToken::new())
            .await
            .unwrap();
        client
            .start_cluster_upgrade(&sample_request(), Some(120), &CancellationToken::new())
            .await
            .unwrap();

        let calls = captured.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0.as_deref(), Some("api-version=6.0&timeout=60"));
        assert_eq!(calls[1].0.as_deref(), Some("api-version=6.0&timeout=120"));

        let body = &calls[0].1;
        assert_eq!(body["CodeVersion"], "1.0.0");
        assert_eq!(body["RollingUpgradeMode"], "Monitored");
        assert_eq!(body["MonitoringPolicy"]["FailureAction"], "Rollback");
        assert_eq!(
            body["MonitoringPolicy"]["HealthCheckWaitDurationInMilliseconds"],
            "30000"
        );
    }

    #[tokio::test]
    async fn server_rejection_is_surfaced_unmodified() {
        let router = Router::new().route("/$/Upgrade", post(reject));
        let client = UpgradeClient::new(serve(router).await).unwrap();

        let err = client
            .start_cluster_upgrade(&sample_request(), None, &CancellationToken::new())
            .await
            .unwrap_err();
        match err {
            ClientError::Http { status, body } => {
                assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
                assert!(body.contains("FABRIC_E_INVALID_ARGUMENT"));
            }
            other => panic!("expected Http error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn cancellation_aborts_in_flight_call() {
        let router = Router::new().route("/$/Upgrade", post(hang));
        let client = UpgradeClient::new(serve(router).await).unwrap();
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let err = client
            .start_cluster_upgrade(&sample_request(), None, &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Cancelled));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_network_error() {
        // Bind then drop to get a port with nothing listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = UpgradeClient::new(format!("http://{}", addr)).unwrap();
        let err = client
            .start_cluster_upgrade(&sample_request(), None, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
    }

    #[tokio::test]
    async fn truncated_error_body_is_a_network_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 64 * 1024];
            let _ = socket.read(&mut buf).await;
            // Promise more body than is sent, then hang up.
            let _ = socket
                .write_all(
                    b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 100\r\n\r\npartial",
                )
                .await;
            let _ = socket.shutdown().await;
        });

        let client = UpgradeClient::new(format!("http://{}", addr)).unwrap();
        let err = client
            .start_cluster_upgrade(&sample_request(), None, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Network(_)), "got {:?}", err);
    }

    #[test]
    fn endpoint_trailing_slash_is_trimmed() {
        let client = UpgradeClient::new("http://10.0.0.4:19080/").unwrap();
        assert_eq!(client.endpoint(), "http://10.0.0.4:19080");
        assert_eq!(
            client.upgrade_url(Some(5)),
            "http://10.0.0.4:19080/$/Upgrade?api-version=6.0&timeout=5"
        );
    }
}
