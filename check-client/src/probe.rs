//! Single-request probe against the device.
//!
//! [`Probe::probe`] is the one primitive every check builds on: it issues a
//! request, compares the status code, and never returns an error. Transport
//! failures become a failed [`ProbeOutcome`] with a readable message.

use crate::transport::{DeviceResponse, Method, Transport, TransportError};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Health/status endpoint. Requires the credential in `Authorization`.
pub const STATUS_ENDPOINT: &str = "/api/status";

/// Endpoint for adding a WiFi network (`{ssid, password}` body).
pub const WIFI_ADD_ENDPOINT: &str = "/api/wifi/add";

/// Result of one probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// True if the status matched the expectation.
    pub ok: bool,
    /// Why the probe passed or failed.
    pub message: String,
    /// The response, when one arrived.
    pub response: Option<DeviceResponse>,
}

impl ProbeOutcome {
    /// Status code of the response, if any.
    pub fn status(&self) -> Option<u16> {
        self.response.as_ref().map(|r| r.status)
    }

    /// True if the device answered at all (any status).
    pub fn reached_device(&self) -> bool {
        self.response.is_some()
    }

    fn from_response(response: DeviceResponse, expected_status: u16) -> Self {
        let (ok, message) = if response.status == expected_status {
            (true, format!("Status {} as expected", response.status))
        } else {
            (
                false,
                format!("Expected {}, got {}", expected_status, response.status),
            )
        };
        Self {
            ok,
            message,
            response: Some(response),
        }
    }

    fn from_error(error: &TransportError) -> Self {
        let message = match error {
            TransportError::Timeout => "Request timeout".to_string(),
            TransportError::ConnectionFailed(_) => {
                "Connection error - device not reachable".to_string()
            }
            other => format!("Error: {}", other),
        };
        Self {
            ok: false,
            message,
            response: None,
        }
    }
}

/// Issues authenticated requests against the device through a [`Transport`].
#[derive(Clone)]
pub struct Probe {
    transport: Arc<dyn Transport>,
    credential: String,
}

impl Probe {
    /// Create a probe that authenticates with `credential`.
    pub fn new(transport: Arc<dyn Transport>, credential: impl Into<String>) -> Self {
        Self {
            transport,
            credential: credential.into(),
        }
    }

    /// The underlying transport, for checks that need custom headers.
    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// The configured credential.
    pub fn credential(&self) -> &str {
        &self.credential
    }

    /// Issue one authenticated request and compare its status to `expected_status`.
    ///
    /// Never fails: timeouts, connection errors and other transport errors
    /// are folded into a failed outcome.
    pub async fn probe(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&Value>,
        expected_status: u16,
    ) -> ProbeOutcome {
        let result = self
            .transport
            .send(method, endpoint, Some(self.credential.as_str()), body)
            .await;

        match result {
            Ok(response) => {
                tracing::debug!(
                    "{} {} -> {} (expected {})",
                    method,
                    endpoint,
                    response.status,
                    expected_status
                );
                ProbeOutcome::from_response(response, expected_status)
            }
            Err(e) => {
                tracing::debug!("{} {} failed: {}", method, endpoint, e);
                ProbeOutcome::from_error(&e)
            }
        }
    }

    /// `GET /api/status` expecting 200.
    pub async fn status(&self) -> ProbeOutcome {
        self.probe(STATUS_ENDPOINT, Method::Get, None, 200).await
    }
}

impl std::fmt::Debug for Probe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Probe")
            .field("credential", &"<redacted>")
            .finish_non_exhaustive()
    }
}
