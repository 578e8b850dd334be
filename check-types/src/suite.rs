//! Suite identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named group of checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuiteId {
    /// Resilience under disconnects, bursts and bad input.
    Chaos,
    /// Authentication, rate limiting and injection probes.
    Security,
    /// COPPA/GDPR smoke checks.
    Compliance,
}

impl SuiteId {
    /// Every suite, in the order a full run executes them.
    pub const ALL: [SuiteId; 3] = [SuiteId::Chaos, SuiteId::Security, SuiteId::Compliance];

    /// Key used for this suite in the JSON report.
    pub fn as_str(self) -> &'static str {
        match self {
            SuiteId::Chaos => "chaos",
            SuiteId::Security => "security",
            SuiteId::Compliance => "compliance",
        }
    }

    /// Label used in the summary table.
    pub fn title(self) -> &'static str {
        match self {
            SuiteId::Chaos => "🌪️  Chaos Tests",
            SuiteId::Security => "🔒 Security Tests",
            SuiteId::Compliance => "✅ Compliance Tests",
        }
    }

    /// Heading logged when the suite starts.
    pub fn banner(self) -> &'static str {
        match self {
            SuiteId::Chaos => "🌪️  CHAOS TESTING",
            SuiteId::Security => "🔒 SECURITY TESTING",
            SuiteId::Compliance => "✅ COMPLIANCE TESTING",
        }
    }
}

impl fmt::Display for SuiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known suite.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown suite: {0}")]
pub struct ParseSuiteError(String);

impl FromStr for SuiteId {
    type Err = ParseSuiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chaos" => Ok(SuiteId::Chaos),
            "security" => Ok(SuiteId::Security),
            "compliance" => Ok(SuiteId::Compliance),
            _ => Err(ParseSuiteError(s.to_string())),
        }
    }
}
