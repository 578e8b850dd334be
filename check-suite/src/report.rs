//! Summary table and JSON report file.

use check_types::{Report, SuiteId};
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors writing the report file.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Output directory could not be created.
    #[error("failed to create report directory {path}: {source}")]
    CreateDir {
        /// Directory path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Report could not be serialized.
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
    /// Report file could not be written.
    #[error("failed to write report {path}: {source}")]
    Write {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// File name for a report produced at `at`: `test_report_YYYYMMDD_HHMMSS.json`.
pub fn report_file_name(at: &DateTime<Local>) -> String {
    format!("test_report_{}.json", at.format("%Y%m%d_%H%M%S"))
}

/// Human-readable summary: one line per suite, then the total.
pub fn render_summary(report: &Report) -> String {
    let rule = "=".repeat(60);
    let mut out = String::new();

    out.push('\n');
    for suite in SuiteId::ALL {
        let results = report.suite(suite);
        let label = format!("{}:", suite.title());
        let _ = writeln!(
            out,
            "{:<20}{}/{} passed",
            label,
            results.passed(),
            results.total()
        );
    }

    let rate = match report.pass_rate() {
        Some(rate) => format!("{:.1}%", rate),
        None => "n/a".to_string(),
    };
    let _ = writeln!(out, "\n{}", rule);
    let _ = writeln!(
        out,
        "TOTAL: {}/{} tests passed ({})",
        report.total_passed(),
        report.total(),
        rate
    );
    let _ = writeln!(out, "{}", rule);

    out
}

/// Serialize `report` into `dir`, creating the directory if needed.
///
/// Returns the path of the written file.
pub async fn write_report(
    report: &Report,
    dir: &Path,
    at: &DateTime<Local>,
) -> Result<PathBuf, ReportError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| ReportError::CreateDir {
            path: dir.to_path_buf(),
            source: e,
        })?;

    let path = dir.join(report_file_name(at));
    let contents = serde_json::to_string_pretty(report)?;

    tokio::fs::write(&path, contents)
        .await
        .map_err(|e| ReportError::Write {
            path: path.clone(),
            source: e,
        })?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use check_types::TestResult;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    fn sample_report() -> Report {
        let mut report = Report::new();
        report.record(SuiteId::Chaos, TestResult::pass("WiFi Reconnection", "ok"));
        report.record(SuiteId::Chaos, TestResult::fail("Rapid API Requests", "2 failures"));
        report.record(SuiteId::Compliance, TestResult::pass("Data Encryption (GDPR)", "ok"));
        report
    }

    #[test]
    fn file_name_embeds_timestamp() {
        assert_eq!(
            report_file_name(&fixed_time()),
            "test_report_20240309_140507.json"
        );
    }

    #[test]
    fn summary_lists_each_suite() {
        let summary = render_summary(&sample_report());
        assert!(summary.contains("Chaos Tests:"));
        assert!(summary.contains("1/2 passed"));
        assert!(summary.contains("0/0 passed"));
        assert!(summary.contains("TOTAL: 2/3 tests passed (66.7%)"));
    }

    #[test]
    fn summary_handles_empty_report() {
        let summary = render_summary(&Report::new());
        assert!(summary.contains("TOTAL: 0/0 tests passed (n/a)"));
    }

    #[tokio::test]
    async fn writes_pretty_json() {
        let dir = tempdir().unwrap();
        let report = sample_report();

        let path = write_report(&report, dir.path(), &fixed_time())
            .await
            .unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "test_report_20240309_140507.json"
        );
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\n  \"chaos\": {"));

        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["chaos"]["passed"], 1);
        assert_eq!(value["chaos"]["failed"], 1);
        assert_eq!(value["chaos"]["tests"][1]["error"], "2 failures");
        assert_eq!(value["security"]["tests"].as_array().unwrap().len(), 0);
        assert_eq!(value["compliance"]["tests"][0]["message"], "ok");
    }

    #[tokio::test]
    async fn creates_missing_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("reports").join("volt");

        let path = write_report(&Report::new(), &nested, &fixed_time())
            .await
            .unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }

    #[tokio::test]
    async fn unwritable_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, "x").unwrap();

        let result = write_report(&Report::new(), &file, &fixed_time()).await;
        assert!(matches!(result, Err(ReportError::CreateDir { .. })));
    }
}
