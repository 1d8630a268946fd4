//! Conformance testing harness for lcdfmt.
//!
//! This crate provides:
//! - Fixtures: JSON case sets describing a call and its expected rendering
//! - Execution: drive `lcdfmt-core` (plain sink or simulated 16x2 panel)
//! - Verification: compare, summarize, and render diffs
//! - Reports: markdown + JSON conformance reports
//! - Structured logs: JSONL run records with schema validation

#![forbid(unsafe_code)]

pub mod config;
pub mod diff;
pub mod error;
pub mod execute;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod structured_log;
pub mod verify;

pub use error::HarnessError;
pub use fixtures::{FixtureCase, FixtureSet};
pub use report::ConformanceReport;
pub use runner::TestRunner;
pub use verify::{VerificationResult, VerificationSummary};
