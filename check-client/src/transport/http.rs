//! reqwest-backed transport for a real device.

use super::{DeviceResponse, Transport, TransportError};
use crate::probe::DEFAULT_TIMEOUT;
use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde_json::Value;
use std::time::Duration;

/// HTTP transport configuration.
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Device address: `host`, `host:port`, or a full `http(s)://` URL.
    pub target: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl HttpTransportConfig {
    /// Config for `target` with the default 10 second timeout.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL derived from the target. Bare addresses get `http://`.
    pub fn base_url(&self) -> String {
        let target = self.target.trim_end_matches('/');
        if target.contains("://") {
            target.to_string()
        } else {
            format!("http://{}", target)
        }
    }
}

/// Transport that sends real HTTP requests to the device.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    http: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport with the configured timeout.
    pub fn new(config: HttpTransportConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            base_url: config.base_url(),
            http,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the URL for a device path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(
        &self,
        request: RequestBuilder,
        authorization: Option<&str>,
        body: Option<&Value>,
    ) -> Result<DeviceResponse, TransportError> {
        let mut request = request;
        if let Some(value) = authorization {
            request = request.header(reqwest::header::AUTHORIZATION, value);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(DeviceResponse { status, body })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(
        &self,
        path: &str,
        authorization: Option<&str>,
    ) -> Result<DeviceResponse, TransportError> {
        self.execute(self.http.get(self.url(path)), authorization, None)
            .await
    }

    async fn post(
        &self,
        path: &str,
        authorization: Option<&str>,
        body: Option<&Value>,
    ) -> Result<DeviceResponse, TransportError> {
        self.execute(self.http.post(self.url(path)), authorization, body)
            .await
    }

    async fn delete(
        &self,
        path: &str,
        authorization: Option<&str>,
        body: Option<&Value>,
    ) -> Result<DeviceResponse, TransportError> {
        self.execute(self.http.delete(self.url(path)), authorization, body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    const PASSWORD: &str = "volt2024";

    async fn status_handler(headers: HeaderMap) -> (StatusCode, &'static str) {
        match headers.get("authorization").and_then(|v| v.to_str().ok()) {
            Some(PASSWORD) => (StatusCode::OK, r#"{"battery":87}"#),
            _ => (StatusCode::UNAUTHORIZED, "unauthorized"),
        }
    }

    async fn wifi_add_handler(Json(body): Json<Value>) -> (StatusCode, String) {
        let ssid = body.get("ssid").and_then(Value::as_str).unwrap_or("");
        if ssid.is_empty() || ssid.len() > 32 || body.get("password").is_none() {
            (StatusCode::BAD_REQUEST, "invalid".to_string())
        } else {
            (StatusCode::OK, format!("added {}", ssid))
        }
    }

    async fn wifi_delete_handler(Json(body): Json<Value>) -> StatusCode {
        if body.get("ssid").is_some() {
            StatusCode::NO_CONTENT
        } else {
            StatusCode::BAD_REQUEST
        }
    }

    async fn slow_handler() -> StatusCode {
        tokio::time::sleep(Duration::from_secs(2)).await;
        StatusCode::OK
    }

    async fn spawn_device() -> SocketAddr {
        let app = Router::new()
            .route("/api/status", get(status_handler))
            .route(
                "/api/wifi/add",
                post(wifi_add_handler).delete(wifi_delete_handler),
            )
            .route("/slow", get(slow_handler));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn transport_for(addr: SocketAddr) -> HttpTransport {
        HttpTransport::new(HttpTransportConfig::new(addr.to_string())).unwrap()
    }

    #[test]
    fn bare_target_gets_http_scheme() {
        let config = HttpTransportConfig::new("192.168.4.1");
        assert_eq!(config.base_url(), "http://192.168.4.1");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn explicit_scheme_is_kept() {
        let config = HttpTransportConfig::new("https://volt.local/");
        assert_eq!(config.base_url(), "https://volt.local");
    }

    #[test]
    fn url_joins_path() {
        let transport = HttpTransport::new(HttpTransportConfig::new("10.0.0.5:8080")).unwrap();
        assert_eq!(
            transport.url("/api/status"),
            "http://10.0.0.5:8080/api/status"
        );
    }

    #[tokio::test]
    async fn get_sends_authorization_header() {
        let transport = transport_for(spawn_device().await);

        let authed = transport.get("/api/status", Some(PASSWORD)).await.unwrap();
        assert_eq!(authed.status, 200);
        assert!(authed.body.contains("battery"));

        let anonymous = transport.get("/api/status", None).await.unwrap();
        assert_eq!(anonymous.status, 401);

        let wrong = transport
            .get("/api/status", Some("wrong_password_0"))
            .await
            .unwrap();
        assert_eq!(wrong.status, 401);
    }

    #[tokio::test]
    async fn post_sends_json_body() {
        let transport = transport_for(spawn_device().await);

        let good = serde_json::json!({"ssid": "home", "password": "secret"});
        let response = transport
            .post("/api/wifi/add", Some(PASSWORD), Some(&good))
            .await
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "added home");

        let empty = serde_json::json!({"ssid": "", "password": "test"});
        let response = transport
            .post("/api/wifi/add", Some(PASSWORD), Some(&empty))
            .await
            .unwrap();
        assert_eq!(response.status, 400);
    }

    #[tokio::test]
    async fn delete_sends_json_body() {
        let transport = transport_for(spawn_device().await);

        let body = serde_json::json!({"ssid": "home"});
        let response = transport
            .delete("/api/wifi/add", Some(PASSWORD), Some(&body))
            .await
            .unwrap();
        assert_eq!(response.status, 204);
    }

    #[tokio::test]
    async fn unknown_path_is_a_status_not_an_error() {
        let transport = transport_for(spawn_device().await);
        let response = transport.get("/api/missing", None).await.unwrap();
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn slow_device_times_out() {
        let addr = spawn_device().await;
        let transport = HttpTransport::new(
            HttpTransportConfig::new(addr.to_string()).with_timeout(Duration::from_millis(100)),
        )
        .unwrap();

        let result = transport.get("/slow", None).await;
        assert!(matches!(result, Err(TransportError::Timeout)));
    }

    #[tokio::test]
    async fn stalled_body_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\nsaved <script>alert('XSS')</script>",
                )
                .await
                .unwrap();
            // Headers and part of the body are out; the rest never comes
            tokio::time::sleep(Duration::from_secs(3)).await;
        });

        let transport = HttpTransport::new(
            HttpTransportConfig::new(addr.to_string()).with_timeout(Duration::from_millis(500)),
        )
        .unwrap();

        let result = transport.get("/api/status", None).await;
        assert!(matches!(result, Err(TransportError::Timeout)), "{:?}", result);
    }

    #[tokio::test]
    async fn closed_port_is_connection_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = transport_for(addr).get("/api/status", None).await;
        assert!(matches!(result, Err(TransportError::ConnectionFailed(_))));
    }
}
