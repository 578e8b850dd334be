//! Transport abstraction for the device API.
//!
//! Checks never talk to reqwest directly. They go through [`Transport`],
//! which has a real implementation ([`HttpTransport`]) and a scripted one
//! ([`MockTransport`]) for offline tests.
//!
//! # Design
//!
//! The trait mirrors the three verbs the device API uses:
//! - `get()` reads a path
//! - `post()` sends an optional JSON body
//! - `delete()` sends an optional JSON body
//!
//! Every call carries an optional `Authorization` header value so checks can
//! probe unauthenticated and wrong-credential paths.
//!
//! # Example
//!
//! ```ignore
//! let transport = MockTransport::new();
//! let response = transport.get("/api/status", Some("volt2024")).await?;
//! assert_eq!(response.status, 200);
//! ```

mod http;
mod mock;

pub use http::{HttpTransport, HttpTransportConfig};
pub use mock::{MockTransport, RecordedRequest};

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request did not complete within the timeout.
    #[error("request timeout")]
    Timeout,

    /// The device could not be reached.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Any other request failure (bad URL, body encoding, protocol error).
    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else if e.is_connect() {
            TransportError::ConnectionFailed(e.to_string())
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

/// HTTP method used by a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// DELETE
    Delete,
}

impl Method {
    /// Upper-case method name.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status and body of a device response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl DeviceResponse {
    /// Response with a status and no body.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }

    /// Response with a status and a body.
    pub fn with_body(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport trait for issuing requests against the device.
///
/// Implementations handle the underlying mechanism (reqwest, scripted fake).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET.
    async fn get(
        &self,
        path: &str,
        authorization: Option<&str>,
    ) -> Result<DeviceResponse, TransportError>;

    /// Issue a POST with an optional JSON body.
    async fn post(
        &self,
        path: &str,
        authorization: Option<&str>,
        body: Option<&Value>,
    ) -> Result<DeviceResponse, TransportError>;

    /// Issue a DELETE with an optional JSON body.
    async fn delete(
        &self,
        path: &str,
        authorization: Option<&str>,
        body: Option<&Value>,
    ) -> Result<DeviceResponse, TransportError>;

    /// Dispatch on `method`. GET ignores `body`.
    async fn send(
        &self,
        method: Method,
        path: &str,
        authorization: Option<&str>,
        body: Option<&Value>,
    ) -> Result<DeviceResponse, TransportError> {
        match method {
            Method::Get => self.get(path, authorization).await,
            Method::Post => self.post(path, authorization, body).await,
            Method::Delete => self.delete(path, authorization, body).await,
        }
    }
}
