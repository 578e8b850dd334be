//! # check-suite
//!
//! Acceptance checks for the VOLT firmware HTTP API.
//!
//! The catalog is fixed: three suites run in order, each an ordered list of
//! [`Check`]s.
//!
//! | Suite | Checks |
//! |-------|--------|
//! | chaos | WiFi reconnection, rapid requests, malformed data |
//! | security | auth required, brute force, SQL injection, XSS |
//! | compliance | data minimization (COPPA), encryption (GDPR) |
//!
//! [`TestRunner`] executes suites against any [`check_client::Transport`],
//! aggregates results into a [`check_types::Report`] and writes it as
//! `test_report_<YYYYMMDD_HHMMSS>.json`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod checks;
pub mod config;
pub mod report;
pub mod runner;

pub use checks::{catalog, Check, CheckContext, CheckError};
pub use config::{
    ConfigError, ConfigFile, Pacing, RunConfig, SuiteSelection, DEFAULT_CREDENTIAL,
    DEFAULT_TARGET,
};
pub use report::{report_file_name, render_summary, write_report, ReportError};
pub use runner::{TestRunner, EXIT_FAILURE, EXIT_SUCCESS};
