//! The check catalog.
//!
//! Each suite maps to a fixed, ordered slice of [`Check`]s. Every check has
//! the same shape: it takes a [`CheckContext`] and produces one
//! [`TestResult`]. Checks are heuristic smoke tests; they look at status
//! codes (and, for XSS, whether the payload is echoed back) and nothing more.
//!
//! Organized by suite:
//!
//! - `chaos` - WiFi reconnection, rapid requests, malformed payloads
//! - `security` - auth required, brute force, SQL injection, XSS
//! - `compliance` - data minimization, encryption

mod chaos;
mod compliance;
mod security;

use check_client::{Probe, TransportError};
use check_types::{SuiteId, TestResult};
use std::time::Duration;
use thiserror::Error;

use crate::config::Pacing;

/// Errors a check can raise instead of returning a result.
///
/// The runner turns these into failed [`TestResult`]s and moves on.
#[derive(Debug, Error)]
pub enum CheckError {
    /// A raw transport call failed where the check needed a response.
    #[error("{0}")]
    Transport(#[from] TransportError),
}

/// What a check runs against.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    /// Authenticated request helper.
    pub probe: &'a Probe,
    /// Sleep durations.
    pub pacing: &'a Pacing,
}

impl CheckContext<'_> {
    /// Sleep for `duration`, skipping the timer entirely when it is zero.
    pub async fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Every check the harness knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Check {
    /// Status before and after a simulated WiFi disconnect.
    WifiReconnection,
    /// 50 status requests at 10 per second.
    RapidRequests,
    /// Malformed WiFi payloads must be rejected with 400.
    MalformedData,
    /// Status without credentials must return 401.
    AuthenticationRequired,
    /// Repeated wrong credentials must eventually return 429.
    BruteForce,
    /// SQL injection strings as SSID.
    SqlInjection,
    /// Script payloads as SSID must not be echoed back raw.
    Xss,
    /// COPPA data minimization smoke check.
    DataMinimization,
    /// GDPR encryption smoke check.
    Encryption,
}

const CHAOS: &[Check] = &[
    Check::WifiReconnection,
    Check::RapidRequests,
    Check::MalformedData,
];

const SECURITY: &[Check] = &[
    Check::AuthenticationRequired,
    Check::BruteForce,
    Check::SqlInjection,
    Check::Xss,
];

const COMPLIANCE: &[Check] = &[Check::DataMinimization, Check::Encryption];

/// Checks belonging to `suite`, in run order.
pub fn catalog(suite: SuiteId) -> &'static [Check] {
    match suite {
        SuiteId::Chaos => CHAOS,
        SuiteId::Security => SECURITY,
        SuiteId::Compliance => COMPLIANCE,
    }
}

impl Check {
    /// Name shown in logs and the report.
    pub fn name(self) -> &'static str {
        match self {
            Check::WifiReconnection => "WiFi Reconnection",
            Check::RapidRequests => "Rapid API Requests",
            Check::MalformedData => "Malformed Data Handling",
            Check::AuthenticationRequired => "Authentication Required",
            Check::BruteForce => "Brute Force Protection",
            Check::SqlInjection => "SQL Injection Protection",
            Check::Xss => "XSS Protection",
            Check::DataMinimization => "Data Minimization (COPPA)",
            Check::Encryption => "Data Encryption (GDPR)",
        }
    }

    /// Suite this check belongs to.
    pub fn suite(self) -> SuiteId {
        match self {
            Check::WifiReconnection | Check::RapidRequests | Check::MalformedData => {
                SuiteId::Chaos
            }
            Check::AuthenticationRequired
            | Check::BruteForce
            | Check::SqlInjection
            | Check::Xss => SuiteId::Security,
            Check::DataMinimization | Check::Encryption => SuiteId::Compliance,
        }
    }

    /// Execute the check.
    pub async fn run(self, ctx: &CheckContext<'_>) -> Result<TestResult, CheckError> {
        match self {
            Check::WifiReconnection => Ok(chaos::wifi_reconnection(ctx).await),
            Check::RapidRequests => Ok(chaos::rapid_requests(ctx).await),
            Check::MalformedData => Ok(chaos::malformed_data(ctx).await),
            Check::AuthenticationRequired => security::authentication_required(ctx).await,
            Check::BruteForce => security::brute_force(ctx).await,
            Check::SqlInjection => Ok(security::sql_injection(ctx).await),
            Check::Xss => Ok(security::xss(ctx).await),
            Check::DataMinimization => Ok(compliance::data_minimization(ctx).await),
            Check::Encryption => Ok(compliance::encryption(ctx).await),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use check_client::{DeviceResponse, MockTransport, RecordedRequest};
    use std::sync::Arc;

    pub const PASSWORD: &str = "volt2024";

    pub fn probe_for(mock: &MockTransport) -> Probe {
        Probe::new(Arc::new(mock.clone()), PASSWORD)
    }

    pub async fn run_check(check: Check, mock: &MockTransport) -> Result<TestResult, CheckError> {
        let probe = probe_for(mock);
        let pacing = Pacing::none();
        let ctx = CheckContext {
            probe: &probe,
            pacing: &pacing,
        };
        check.run(&ctx).await
    }

    /// A well-behaved device: authenticates, validates WiFi input, rate limits.
    pub fn healthy_device() -> MockTransport {
        let mut wrong_attempts = 0;
        MockTransport::from_fn(move |req: &RecordedRequest| {
            let response = match req.path.as_str() {
                "/api/status" => match req.authorization.as_deref() {
                    Some(PASSWORD) => DeviceResponse::with_body(200, r#"{"battery":90}"#),
                    None => DeviceResponse::status(401),
                    Some(_) => {
                        wrong_attempts += 1;
                        if wrong_attempts >= 5 {
                            DeviceResponse::status(429)
                        } else {
                            DeviceResponse::status(401)
                        }
                    }
                },
                "/api/wifi/add" => DeviceResponse::status(400),
                _ => DeviceResponse::status(404),
            };
            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suites_have_expected_sizes() {
        assert_eq!(catalog(SuiteId::Chaos).len(), 3);
        assert_eq!(catalog(SuiteId::Security).len(), 4);
        assert_eq!(catalog(SuiteId::Compliance).len(), 2);
    }

    #[test]
    fn every_check_is_in_its_own_suite() {
        for suite in SuiteId::ALL {
            for check in catalog(suite) {
                assert_eq!(check.suite(), suite, "{} misfiled", check.name());
            }
        }
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<&str> = SuiteId::ALL
            .iter()
            .flat_map(|s| catalog(*s).iter().map(|c| c.name()))
            .collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn check_error_displays_transport_cause() {
        let err = CheckError::from(TransportError::Timeout);
        assert_eq!(err.to_string(), "request timeout");
    }
}
