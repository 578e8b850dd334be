//! Run configuration.
//!
//! A [`RunConfig`] is built once by the CLI and handed to the runner. Values
//! come from built-in defaults, then an optional TOML file ([`ConfigFile`]),
//! then command-line flags.

use check_types::SuiteId;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default device address (the watch's soft-AP).
pub const DEFAULT_TARGET: &str = "192.168.4.1";

/// Default API credential.
pub const DEFAULT_CREDENTIAL: &str = "volt2024";

/// Which suites to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuiteSelection {
    /// Preflight, then every suite in order.
    #[default]
    All,
    /// One suite, no preflight.
    Only(SuiteId),
}

impl SuiteSelection {
    /// Suites this selection executes, in run order.
    pub fn suites(self) -> Vec<SuiteId> {
        match self {
            SuiteSelection::All => SuiteId::ALL.to_vec(),
            SuiteSelection::Only(id) => vec![id],
        }
    }

    /// Only the full run checks connectivity first.
    pub fn runs_preflight(self) -> bool {
        matches!(self, SuiteSelection::All)
    }
}

/// Sleeps that keep the harness from hammering the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Pause after every check.
    pub between_tests: Duration,
    /// Gap between requests in the rapid-request burst (10/s).
    pub burst_interval: Duration,
    /// Simulated WiFi disconnect.
    pub disconnect: Duration,
    /// Gap between brute-force attempts.
    pub brute_force_interval: Duration,
}

impl Pacing {
    /// No sleeping at all. For offline tests.
    pub fn none() -> Self {
        Self {
            between_tests: Duration::ZERO,
            burst_interval: Duration::ZERO,
            disconnect: Duration::ZERO,
            brute_force_interval: Duration::ZERO,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            between_tests: Duration::from_millis(default_between_tests_ms()),
            burst_interval: Duration::from_millis(default_burst_interval_ms()),
            disconnect: Duration::from_millis(default_disconnect_ms()),
            brute_force_interval: Duration::from_millis(default_brute_force_interval_ms()),
        }
    }
}

/// Everything a run needs. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Device address (`host`, `host:port` or URL).
    pub target: String,
    /// Value sent in the `Authorization` header.
    pub credential: String,
    /// Suites to run.
    pub selection: SuiteSelection,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Sleep durations.
    pub pacing: Pacing,
    /// Directory the JSON report is written to.
    pub output_dir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        ConfigFile::default().into_run_config()
    }
}

impl RunConfig {
    /// Reject values that cannot produce a meaningful run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target.trim().is_empty() {
            return Err(ConfigError::Invalid {
                reason: "device address is empty".into(),
            });
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::Invalid {
                reason: "request timeout must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

/// Root of the optional TOML configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Device connection settings.
    #[serde(default)]
    pub device: DeviceConfig,
    /// Pacing settings.
    #[serde(default)]
    pub pacing: PacingConfig,
    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// `[device]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    /// Device address (default: 192.168.4.1).
    #[serde(default = "default_ip")]
    pub ip: String,
    /// API credential (default: volt2024).
    #[serde(default = "default_password")]
    pub password: String,
    /// Per-request timeout in seconds (default: 10).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// `[pacing]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PacingConfig {
    /// Pause after every check (default: 1000).
    #[serde(default = "default_between_tests_ms")]
    pub between_tests_ms: u64,
    /// Gap between burst requests (default: 100).
    #[serde(default = "default_burst_interval_ms")]
    pub burst_interval_ms: u64,
    /// Simulated disconnect length (default: 5000).
    #[serde(default = "default_disconnect_ms")]
    pub disconnect_ms: u64,
    /// Gap between brute-force attempts (default: 100).
    #[serde(default = "default_brute_force_interval_ms")]
    pub brute_force_interval_ms: u64,
}

/// `[report]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Output directory for the JSON report (default: current directory).
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

// Default value functions
fn default_ip() -> String {
    DEFAULT_TARGET.to_string()
}

fn default_password() -> String {
    DEFAULT_CREDENTIAL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_between_tests_ms() -> u64 {
    1000
}

fn default_burst_interval_ms() -> u64 {
    100 // 10 requests per second
}

fn default_disconnect_ms() -> u64 {
    5000
}

fn default_brute_force_interval_ms() -> u64 {
    100
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            ip: default_ip(),
            password: default_password(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            between_tests_ms: default_between_tests_ms(),
            burst_interval_ms: default_burst_interval_ms(),
            disconnect_ms: default_disconnect_ms(),
            brute_force_interval_ms: default_brute_force_interval_ms(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

impl ConfigFile {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Convert to a run configuration that runs every suite.
    pub fn into_run_config(self) -> RunConfig {
        RunConfig {
            target: self.device.ip,
            credential: self.device.password,
            selection: SuiteSelection::All,
            timeout: Duration::from_secs(self.device.timeout_secs),
            pacing: Pacing {
                between_tests: Duration::from_millis(self.pacing.between_tests_ms),
                burst_interval: Duration::from_millis(self.pacing.burst_interval_ms),
                disconnect: Duration::from_millis(self.pacing.disconnect_ms),
                brute_force_interval: Duration::from_millis(self.pacing.brute_force_interval_ms),
            },
            output_dir: self.report.output_dir,
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: toml::de::Error,
    },
    /// A value is out of range.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// What is wrong.
        reason: String,
    },
}
