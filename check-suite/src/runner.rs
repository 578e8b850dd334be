//! Sequential suite runner.
//!
//! Lifecycle: not started → suite N running → reporting → done. Exactly one
//! logical actor touches the [`Report`], so there is no locking.

use check_client::{
    HttpTransport, HttpTransportConfig, Method, Probe, ProbeOutcome, Transport, TransportError,
    STATUS_ENDPOINT,
};
use check_types::{Report, SuiteId, TestResult};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

use crate::checks::{catalog, CheckContext};
use crate::config::{RunConfig, SuiteSelection};
use crate::report::{render_summary, write_report, ReportError};

/// Exit code when every executed check passed.
pub const EXIT_SUCCESS: u8 = 0;

/// Exit code when any check failed or the device was unreachable.
pub const EXIT_FAILURE: u8 = 1;

/// Runs suites against a device and aggregates the results.
#[derive(Debug)]
pub struct TestRunner {
    config: RunConfig,
    probe: Probe,
    report: Report,
    last_report_path: Option<PathBuf>,
}

impl TestRunner {
    /// Create a runner over an arbitrary transport.
    pub fn new(config: RunConfig, transport: Arc<dyn Transport>) -> Self {
        let probe = Probe::new(transport, config.credential.clone());
        Self {
            config,
            probe,
            report: Report::new(),
            last_report_path: None,
        }
    }

    /// Create a runner that talks HTTP to `config.target`.
    pub fn with_http(config: RunConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(
            HttpTransportConfig::new(config.target.clone()).with_timeout(config.timeout),
        )?;
        tracing::debug!("Device API at {}", transport.base_url());
        Ok(Self::new(config, Arc::new(transport)))
    }

    /// The run configuration.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Results collected so far.
    pub fn results(&self) -> &Report {
        &self.report
    }

    /// Path of the most recently written report file.
    pub fn last_report_path(&self) -> Option<&PathBuf> {
        self.last_report_path.as_ref()
    }

    /// One authenticated request; see [`Probe::probe`].
    pub async fn probe(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&Value>,
        expected_status: u16,
    ) -> ProbeOutcome {
        self.probe
            .probe(endpoint, method, body, expected_status)
            .await
    }

    /// Check the status endpoint answers. Logs guidance on failure.
    pub async fn preflight(&self) -> bool {
        tracing::info!("ℹ️ Checking device connectivity...");
        let outcome = self.probe(STATUS_ENDPOINT, Method::Get, None, 200).await;

        if outcome.ok {
            tracing::info!("✅ Device connected successfully!");
            return true;
        }

        tracing::error!("❌ FATAL: Cannot connect to device - {}", outcome.message);
        tracing::info!("ℹ️ Please ensure:");
        tracing::info!("ℹ️   1. VOLT watch is powered on");
        tracing::info!("ℹ️   2. Connected to same network");
        tracing::info!("ℹ️   3. Device IP is correct ({})", self.config.target);
        false
    }

    /// Run every check in `suite`, recording one result per check.
    ///
    /// A check that raises an error is recorded as failed with the error's
    /// description; the next check still runs.
    pub async fn run_suite(&mut self, suite: SuiteId) {
        tracing::info!("ℹ️ {}", suite.banner());
        tracing::info!("ℹ️ {}", "=".repeat(60));

        for check in catalog(suite) {
            let name = check.name();
            tracing::info!("ℹ️ Testing: {}", name);

            let ctx = CheckContext {
                probe: &self.probe,
                pacing: &self.config.pacing,
            };
            let result = match check.run(&ctx).await {
                Ok(result) => result,
                Err(e) => TestResult::fail(name, e.to_string()),
            };

            if result.passed() {
                tracing::info!("✅ {}: PASSED - {}", name, result.detail().text());
            } else {
                tracing::error!("❌ {}: FAILED - {}", name, result.detail().text());
            }
            self.report.record(check.suite(), result);

            ctx.pause(self.config.pacing.between_tests).await;
        }
    }

    /// Print the summary, write the JSON report, and return the exit code.
    ///
    /// # Errors
    ///
    /// Returns an error if the report file cannot be written.
    pub async fn report(&mut self) -> Result<u8, ReportError> {
        tracing::info!("ℹ️ 📊 TEST REPORT");
        tracing::info!("ℹ️ {}", "=".repeat(60));

        println!("{}", render_summary(&self.report));

        let now = chrono::Local::now();
        let path = write_report(&self.report, &self.config.output_dir, &now).await?;
        tracing::info!("ℹ️ Detailed report saved to: {}", path.display());
        self.last_report_path = Some(path);

        Ok(if self.report.all_passed() {
            EXIT_SUCCESS
        } else {
            EXIT_FAILURE
        })
    }

    /// Preflight, then chaos, security and compliance, then report.
    ///
    /// Returns [`EXIT_FAILURE`] without running anything (and without
    /// writing a report) if the device is unreachable.
    pub async fn run_all(&mut self) -> Result<u8, ReportError> {
        self.execute(SuiteSelection::All).await
    }

    /// Run whatever the configuration selects.
    ///
    /// Single-suite selections skip the preflight and go straight to the
    /// suite.
    pub async fn run_selected(&mut self) -> Result<u8, ReportError> {
        self.execute(self.config.selection).await
    }

    async fn execute(&mut self, selection: SuiteSelection) -> Result<u8, ReportError> {
        if selection.runs_preflight() {
            tracing::info!("ℹ️ {}", "=".repeat(60));
            tracing::info!("ℹ️ ⚡ VOLT Firmware - Comprehensive Test Suite");
            tracing::info!("ℹ️ {}", "=".repeat(60));
            tracing::info!("ℹ️ Device: {}", self.config.target);
            tracing::info!(
                "ℹ️ Started: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
            );

            if !self.preflight().await {
                return Ok(EXIT_FAILURE);
            }
        }

        for suite in selection.suites() {
            self.run_suite(suite).await;
        }

        self.report().await
    }
}
