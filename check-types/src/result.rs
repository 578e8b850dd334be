//! Check outcomes and their aggregates.

use serde::{Deserialize, Serialize};

use crate::SuiteId;

/// Explanation attached to a [`TestResult`].
///
/// Serialized under a `message` key for passing checks and an `error` key
/// for failing ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Detail {
    /// Why the check passed.
    Message(String),
    /// Why the check failed.
    Error(String),
}

impl Detail {
    /// The explanation text, whichever side it is on.
    pub fn text(&self) -> &str {
        match self {
            Detail::Message(s) | Detail::Error(s) => s,
        }
    }
}

/// Outcome of a single check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    name: String,
    passed: bool,
    #[serde(flatten)]
    detail: Detail,
}

impl TestResult {
    /// Create a passing result.
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            detail: Detail::Message(message.into()),
        }
    }

    /// Create a failing result.
    pub fn fail(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            detail: Detail::Error(error.into()),
        }
    }

    /// Check name as shown in logs and the report.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the check passed.
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Message on pass, error on failure.
    pub fn detail(&self) -> &Detail {
        &self.detail
    }
}

/// Aggregate for one suite.
///
/// Counts only move through [`SuiteResults::record`], so
/// `passed + failed == tests.len()` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuiteResults {
    passed: usize,
    failed: usize,
    tests: Vec<TestResult>,
}

impl SuiteResults {
    /// Create an empty aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result and bump the matching counter.
    pub fn record(&mut self, result: TestResult) {
        if result.passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.tests.push(result);
    }

    /// Number of passing checks.
    pub fn passed(&self) -> usize {
        self.passed
    }

    /// Number of failing checks.
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Number of recorded checks.
    pub fn total(&self) -> usize {
        self.tests.len()
    }

    /// Recorded results in execution order.
    pub fn tests(&self) -> &[TestResult] {
        &self.tests
    }

    /// True if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

/// All suite aggregates for one invocation.
///
/// Serializes as a JSON object keyed `chaos`, `security`, `compliance`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    chaos: SuiteResults,
    security: SuiteResults,
    compliance: SuiteResults,
}

impl Report {
    /// Create a report with three empty suites.
    pub fn new() -> Self {
        Self::default()
    }

    /// Results for a suite.
    pub fn suite(&self, id: SuiteId) -> &SuiteResults {
        match id {
            SuiteId::Chaos => &self.chaos,
            SuiteId::Security => &self.security,
            SuiteId::Compliance => &self.compliance,
        }
    }

    /// Append a result to a suite.
    pub fn record(&mut self, id: SuiteId, result: TestResult) {
        let suite = match id {
            SuiteId::Chaos => &mut self.chaos,
            SuiteId::Security => &mut self.security,
            SuiteId::Compliance => &mut self.compliance,
        };
        suite.record(result);
    }

    /// Passing checks across all suites.
    pub fn total_passed(&self) -> usize {
        SuiteId::ALL.iter().map(|id| self.suite(*id).passed()).sum()
    }

    /// Failing checks across all suites.
    pub fn total_failed(&self) -> usize {
        SuiteId::ALL.iter().map(|id| self.suite(*id).failed()).sum()
    }

    /// Recorded checks across all suites.
    pub fn total(&self) -> usize {
        self.total_passed() + self.total_failed()
    }

    /// Pass rate in percent, or `None` when nothing ran.
    pub fn pass_rate(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            None
        } else {
            Some(self.total_passed() as f64 / total as f64 * 100.0)
        }
    }

    /// True if no recorded check failed.
    pub fn all_passed(&self) -> bool {
        self.total_failed() == 0
    }
}
