//! # volt-check
//!
//! Acceptance tests for the VOLT firmware HTTP API.
//!
//! ## Suites
//!
//! - `chaos`: WiFi reconnection, rapid requests, malformed payloads
//! - `security`: auth required, brute force, SQL injection, XSS
//! - `compliance`: data minimization (COPPA), encryption (GDPR)
//!
//! ## Example
//!
//! ```bash
//! # Full run against the watch's soft-AP (checks connectivity first)
//! volt-check
//!
//! # Another device, one suite only (no connectivity check)
//! volt-check --ip 10.0.0.7 --password hunter2 --security-only
//!
//! # Settings from a file, reports into ./reports
//! volt-check --config volt-check.toml --output-dir reports
//! ```
//!
//! Exits 0 when every executed check passed, 1 otherwise.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use check_suite::TestRunner;

/// VOLT firmware acceptance test suite.
#[derive(Parser, Debug)]
#[command(name = "volt-check")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Device IP address [default: 192.168.4.1]
    #[arg(long)]
    ip: Option<String>,

    /// API password [default: volt2024]
    #[arg(long)]
    password: Option<String>,

    /// Run only chaos tests
    #[arg(long, conflicts_with_all = ["security_only", "compliance_only"])]
    chaos_only: bool,

    /// Run only security tests
    #[arg(long, conflicts_with = "compliance_only")]
    security_only: bool,

    /// Run only compliance tests
    #[arg(long)]
    compliance_only: bool,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the JSON report [default: .]
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Per-request timeout in seconds [default: 10]
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Skip all pacing sleeps
    #[arg(long)]
    no_pacing: bool,

    /// List suites and checks, then exit
    #[arg(long)]
    list: bool,

    /// Enable verbose logging (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match cli.verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    if cli.list {
        print!("{}", config::render_catalog());
        return Ok(ExitCode::SUCCESS);
    }

    let run_config = config::build(&config::Overrides {
        config_file: cli.config,
        ip: cli.ip,
        password: cli.password,
        chaos_only: cli.chaos_only,
        security_only: cli.security_only,
        compliance_only: cli.compliance_only,
        output_dir: cli.output_dir,
        timeout_secs: cli.timeout_secs,
        no_pacing: cli.no_pacing,
    })?;

    let mut runner = TestRunner::with_http(run_config).context("Failed to build HTTP client")?;
    tracing::debug!(
        "Target {} with {:?}",
        runner.config().target,
        runner.config().selection
    );

    let code = runner
        .run_selected()
        .await
        .context("Failed to write test report")?;

    Ok(ExitCode::from(code))
}
