//! Turns command-line flags into a run configuration.

use anyhow::Result;
use check_suite::{catalog, ConfigFile, Pacing, RunConfig, SuiteSelection};
use check_types::SuiteId;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Duration;

/// Flag values that can override the file and built-in defaults.
#[derive(Debug, Default)]
pub struct Overrides {
    pub config_file: Option<PathBuf>,
    pub ip: Option<String>,
    pub password: Option<String>,
    pub chaos_only: bool,
    pub security_only: bool,
    pub compliance_only: bool,
    pub output_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub no_pacing: bool,
}

impl Overrides {
    fn selection(&self) -> SuiteSelection {
        if self.chaos_only {
            SuiteSelection::Only(SuiteId::Chaos)
        } else if self.security_only {
            SuiteSelection::Only(SuiteId::Security)
        } else if self.compliance_only {
            SuiteSelection::Only(SuiteId::Compliance)
        } else {
            SuiteSelection::All
        }
    }
}

/// Build the run configuration: flags > config file > defaults.
pub fn build(overrides: &Overrides) -> Result<RunConfig> {
    let file = match &overrides.config_file {
        Some(path) => ConfigFile::from_file(path)?,
        None => ConfigFile::default(),
    };

    let mut config = file.into_run_config();
    config.selection = overrides.selection();

    if let Some(ip) = &overrides.ip {
        config.target = ip.clone();
    }
    if let Some(password) = &overrides.password {
        config.credential = password.clone();
    }
    if let Some(dir) = &overrides.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(secs) = overrides.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }
    if overrides.no_pacing {
        config.pacing = Pacing::none();
    }

    config.validate()?;
    Ok(config)
}

/// Suites and their checks in run order.
pub fn render_catalog() -> String {
    let mut out = String::new();
    for suite in SuiteId::ALL {
        let _ = writeln!(out, "{}", suite);
        for check in catalog(suite) {
            let _ = writeln!(out, "  - {}", check.name());
        }
    }
    out
}
