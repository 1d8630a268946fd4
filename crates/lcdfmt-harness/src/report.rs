//! Report generation for conformance results.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::verify::VerificationSummary;

/// A conformance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    /// Report title.
    pub title: String,
    /// Interpreter modes tested.
    pub mode: String,
    /// Timestamp (UTC).
    pub timestamp: String,
    /// Verification summary.
    pub summary: VerificationSummary,
}

impl ConformanceReport {
    /// Markdown: header, per-section tallies, every case, then failure diffs.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let summary = &self.summary;
        let mut out = String::new();
        let _ = writeln!(out, "# {}\n", self.title);
        let _ = writeln!(out, "- Mode: {}", self.mode);
        let _ = writeln!(out, "- Timestamp: {}", self.timestamp);
        let _ = writeln!(
            out,
            "- Cases: {} ({} passed, {} failed)\n",
            summary.total, summary.passed, summary.failed
        );

        out.push_str("| Section | Mode | Passed |\n|---------|------|--------|\n");
        for ((section, mode), tally) in summary.by_section() {
            let _ = writeln!(out, "| {section} | {mode} | {}/{} |", tally.passed, tally.total);
        }

        out.push_str("\n| Case | Section | Mode | Status |\n|------|---------|------|--------|\n");
        for r in &summary.results {
            let status = if r.passed { "PASS" } else { "FAIL" };
            let _ = writeln!(out, "| {} | {} | {} | {status} |", r.case_name, r.section, r.mode);
        }

        for (i, r) in summary.failures().enumerate() {
            if i == 0 {
                out.push_str("\n## Failures\n");
            }
            let diff = r.diff.as_deref().unwrap_or("(no diff)");
            let _ = writeln!(
                out,
                "\n### {} ({})\n\n```\n{}\n```",
                r.case_name,
                r.mode,
                diff.trim_end()
            );
        }
        out
    }

    /// Pretty JSON of the whole report.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}
