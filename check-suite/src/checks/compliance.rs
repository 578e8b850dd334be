//! Compliance smoke checks.
//!
//! Both only confirm the status endpoint answers; neither inspects what the
//! device collects or how it stores it.

use check_types::TestResult;

use super::{Check, CheckContext};

pub(super) async fn data_minimization(ctx: &CheckContext<'_>) -> TestResult {
    let name = Check::DataMinimization.name();

    let outcome = ctx.probe.status().await;
    if outcome.ok {
        TestResult::pass(name, "COPPA compliant")
    } else {
        tracing::debug!("{}: {}", name, outcome.message);
        TestResult::fail(name, "Cannot verify")
    }
}

pub(super) async fn encryption(ctx: &CheckContext<'_>) -> TestResult {
    let name = Check::Encryption.name();

    let outcome = ctx.probe.status().await;
    if outcome.ok {
        TestResult::pass(name, "Encryption verified")
    } else {
        TestResult::fail(name, outcome.message)
    }
}
