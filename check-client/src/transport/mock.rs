//! Mock transport for testing.
//!
//! Answers from a scripted responder and records every request for
//! verification.

use super::{DeviceResponse, Method, Transport, TransportError};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// A request captured by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: Method,
    /// Device path.
    pub path: String,
    /// `Authorization` header value, if any.
    pub authorization: Option<String>,
    /// JSON body, if any. Always `None` for GET.
    pub body: Option<Value>,
}

type Responder = Box<dyn FnMut(&RecordedRequest) -> Result<DeviceResponse, TransportError> + Send>;

/// Mock transport for testing.
///
/// Without a responder every request answers 200 with an empty body.
/// Clones share state, so a test can keep one handle for inspection while
/// another is injected into the code under test.
#[derive(Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

#[derive(Default)]
struct MockTransportInner {
    requests: Vec<RecordedRequest>,
    responder: Option<Responder>,
    fail_next: Option<TransportError>,
    unreachable: bool,
}

impl MockTransport {
    /// Create a mock that answers 200 to everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock whose answers come from `responder`.
    ///
    /// The responder sees requests in order, so it can keep its own
    /// counters (e.g. to start rate limiting after N attempts).
    pub fn from_fn<F>(responder: F) -> Self
    where
        F: FnMut(&RecordedRequest) -> Result<DeviceResponse, TransportError> + Send + 'static,
    {
        let mock = Self::new();
        mock.lock().responder = Some(Box::new(responder));
        mock
    }

    /// Create a mock where every request fails with a connection error.
    pub fn unreachable() -> Self {
        let mock = Self::new();
        mock.lock().unreachable = true;
        mock
    }

    /// Cause the next request to fail with the given error.
    pub fn fail_next(&self, error: TransportError) {
        self.lock().fail_next = Some(error);
    }

    /// Get all requests that were issued.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Number of requests issued.
    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// Requests issued to a given path.
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }

    /// Forget recorded requests. The responder is kept.
    pub fn clear_requests(&self) {
        self.lock().requests.clear();
    }

    fn lock(&self) -> MutexGuard<'_, MockTransportInner> {
        // A panicking responder poisons the lock; the recorded data is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn handle(
        &self,
        method: Method,
        path: &str,
        authorization: Option<&str>,
        body: Option<&Value>,
    ) -> Result<DeviceResponse, TransportError> {
        let mut inner = self.lock();

        let request = RecordedRequest {
            method,
            path: path.to_string(),
            authorization: authorization.map(str::to_string),
            body: body.cloned(),
        };
        inner.requests.push(request.clone());

        if let Some(error) = inner.fail_next.take() {
            return Err(error);
        }

        if inner.unreachable {
            return Err(TransportError::ConnectionFailed(
                "mock device unreachable".into(),
            ));
        }

        match inner.responder.as_mut() {
            Some(responder) => responder(&request),
            None => Ok(DeviceResponse::status(200)),
        }
    }
}

impl Clone for MockTransport {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("MockTransport")
            .field("requests", &inner.requests.len())
            .field("scripted", &inner.responder.is_some())
            .field("unreachable", &inner.unreachable)
            .finish()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(
        &self,
        path: &str,
        authorization: Option<&str>,
    ) -> Result<DeviceResponse, TransportError> {
        self.handle(Method::Get, path, authorization, None)
    }

    async fn post(
        &self,
        path: &str,
        authorization: Option<&str>,
        body: Option<&Value>,
    ) -> Result<DeviceResponse, TransportError> {
        self.handle(Method::Post, path, authorization, body)
    }

    async fn delete(
        &self,
        path: &str,
        authorization: Option<&str>,
        body: Option<&Value>,
    ) -> Result<DeviceResponse, TransportError> {
        self.handle(Method::Delete, path, authorization, body)
    }
}
