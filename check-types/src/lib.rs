//! # check-types
//!
//! Data model shared by the VOLT acceptance harness crates:
//! - [`SuiteId`] - The three named suites and their fixed run order
//! - [`TestResult`] - Outcome of a single check
//! - [`SuiteResults`] - Per-suite aggregate (`passed + failed == tests.len()`)
//! - [`Report`] - All suite aggregates for one invocation

#![warn(missing_docs)]
#![warn(clippy::all)]

mod result;
mod suite;

pub use result::{Detail, Report, SuiteResults, TestResult};
pub use suite::{ParseSuiteError, SuiteId};
