//! Chaos checks: disconnects, request bursts, malformed input.
//!
//! No fault is actually injected. The disconnect is a sleep and the burst is
//! paced; these confirm the device stays responsive and keeps validating.

use check_client::{Method, WIFI_ADD_ENDPOINT};
use check_types::TestResult;
use serde_json::{json, Value};

use super::{Check, CheckContext};

/// Requests in the rapid-request burst.
pub(crate) const BURST_REQUESTS: usize = 50;

/// Payloads `/api/wifi/add` must reject with 400.
fn malformed_payloads() -> Vec<Value> {
    vec![
        json!({"ssid": "A".repeat(100), "password": "test"}), // SSID too long
        json!({"ssid": "", "password": "test"}),              // empty SSID
        json!({"ssid": "test"}),                              // missing password
        json!({"invalid": "data"}),                           // wrong fields
    ]
}

pub(super) async fn wifi_reconnection(ctx: &CheckContext<'_>) -> TestResult {
    let name = Check::WifiReconnection.name();

    let before = ctx.probe.status().await;
    if !before.ok {
        return TestResult::fail(name, before.message);
    }

    tracing::warn!("⚠️ Simulating WiFi disconnect...");
    ctx.pause(ctx.pacing.disconnect).await;

    let after = ctx.probe.status().await;
    if after.ok {
        TestResult::pass(name, "WiFi reconnected")
    } else {
        TestResult::fail(name, after.message)
    }
}

pub(super) async fn rapid_requests(ctx: &CheckContext<'_>) -> TestResult {
    let name = Check::RapidRequests.name();

    let mut failures = 0;
    for _ in 0..BURST_REQUESTS {
        if !ctx.probe.status().await.ok {
            failures += 1;
        }
        ctx.pause(ctx.pacing.burst_interval).await;
    }

    if failures == 0 {
        TestResult::pass(name, "All requests succeeded")
    } else {
        tracing::debug!("{}/{} burst requests failed", failures, BURST_REQUESTS);
        TestResult::fail(name, format!("{} failures", failures))
    }
}

pub(super) async fn malformed_data(ctx: &CheckContext<'_>) -> TestResult {
    let name = Check::MalformedData.name();
    let payloads = malformed_payloads();

    let mut accepted = 0;
    for payload in &payloads {
        let outcome = ctx
            .probe
            .probe(WIFI_ADD_ENDPOINT, Method::Post, Some(payload), 400)
            .await;
        if !outcome.ok {
            tracing::debug!("Malformed payload not rejected: {}", outcome.message);
            accepted += 1;
        }
    }

    if accepted == 0 {
        TestResult::pass(name, "Proper validation")
    } else {
        TestResult::fail(
            name,
            format!(
                "Validation issues: {}/{} malformed payloads not rejected",
                accepted,
                payloads.len()
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{healthy_device, run_check};
    use super::*;
    use check_client::{DeviceResponse, MockTransport, TransportError};

    #[tokio::test]
    async fn reconnection_passes_when_status_recovers() {
        let mock = healthy_device();
        let result = run_check(Check::WifiReconnection, &mock).await.unwrap();

        assert!(result.passed());
        assert_eq!(result.detail().text(), "WiFi reconnected");
        assert_eq!(mock.requests_to("/api/status").len(), 2);
    }

    #[tokio::test]
    async fn reconnection_stops_if_initial_status_fails() {
        let mock = MockTransport::unreachable();
        let result = run_check(Check::WifiReconnection, &mock).await.unwrap();

        assert!(!result.passed());
        assert_eq!(
            result.detail().text(),
            "Connection error - device not reachable"
        );
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn reconnection_fails_if_device_stays_down() {
        let mut calls = 0;
        let mock = MockTransport::from_fn(move |_| {
            calls += 1;
            if calls == 1 {
                Ok(DeviceResponse::status(200))
            } else {
                Err(TransportError::Timeout)
            }
        });

        let result = run_check(Check::WifiReconnection, &mock).await.unwrap();
        assert!(!result.passed());
        assert_eq!(result.detail().text(), "Request timeout");
    }

    #[tokio::test]
    async fn burst_sends_fifty_requests() {
        let mock = healthy_device();
        let result = run_check(Check::RapidRequests, &mock).await.unwrap();

        assert!(result.passed());
        assert_eq!(mock.request_count(), BURST_REQUESTS);
    }

    #[tokio::test]
    async fn burst_counts_failures() {
        let mut calls = 0;
        let mock = MockTransport::from_fn(move |_| {
            calls += 1;
            // Every tenth request is dropped
            if calls % 10 == 0 {
                Ok(DeviceResponse::status(503))
            } else {
                Ok(DeviceResponse::status(200))
            }
        });

        let result = run_check(Check::RapidRequests, &mock).await.unwrap();
        assert!(!result.passed());
        assert_eq!(result.detail().text(), "5 failures");
    }

    #[tokio::test]
    async fn malformed_payloads_rejected_passes() {
        let mock = healthy_device();
        let result = run_check(Check::MalformedData, &mock).await.unwrap();

        assert!(result.passed());
        let posts = mock.requests_to(WIFI_ADD_ENDPOINT);
        assert_eq!(posts.len(), 4);
        assert!(posts.iter().all(|r| r.method == Method::Post));
        assert_eq!(posts[3].body, Some(json!({"invalid": "data"})));
    }

    #[tokio::test]
    async fn accepted_malformed_payload_fails() {
        let mock = MockTransport::from_fn(|req| {
            let empty_ssid = req
                .body
                .as_ref()
                .and_then(|b| b.get("ssid"))
                .and_then(Value::as_str)
                == Some("");
            Ok(DeviceResponse::status(if empty_ssid { 200 } else { 400 }))
        });

        let result = run_check(Check::MalformedData, &mock).await.unwrap();
        assert!(!result.passed());
        assert!(result.detail().text().contains("1/4"));
    }

    #[tokio::test]
    async fn unreachable_device_fails_validation() {
        let mock = MockTransport::unreachable();
        let result = run_check(Check::MalformedData, &mock).await.unwrap();
        assert!(!result.passed());
        assert!(result.detail().text().contains("4/4"));
    }

    #[test]
    fn oversized_ssid_is_one_hundred_chars() {
        let payloads = malformed_payloads();
        assert_eq!(payloads[0]["ssid"].as_str().unwrap().len(), 100);
    }
}
