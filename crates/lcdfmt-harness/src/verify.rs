//! Per-case verdicts and their roll-up.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Verdict for one fixture case under one interpreter mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub case_name: String,
    /// Behavior the case covers (`width`, `missing argument`, ...).
    pub section: String,
    /// `lenient` or `strict`.
    pub mode: String,
    pub passed: bool,
    pub expected: String,
    pub actual: String,
    /// Rendered diff plus error-code notes, for failures.
    pub diff: Option<String>,
}

/// Pass and total counts for a group of cases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub passed: usize,
    pub total: usize,
}

impl Tally {
    fn count(&mut self, passed: bool) {
        self.total += 1;
        self.passed += usize::from(passed);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<VerificationResult>,
}

impl VerificationSummary {
    #[must_use]
    pub fn from_results(results: Vec<VerificationResult>) -> Self {
        let mut overall = Tally::default();
        for result in &results {
            overall.count(result.passed);
        }
        Self {
            total: overall.total,
            passed: overall.passed,
            failed: overall.total - overall.passed,
            results,
        }
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &VerificationResult> {
        self.results.iter().filter(|r| !r.passed)
    }

    /// Counts grouped by `(section, mode)`, sorted.
    #[must_use]
    pub fn by_section(&self) -> BTreeMap<(&str, &str), Tally> {
        let mut groups: BTreeMap<(&str, &str), Tally> = BTreeMap::new();
        for result in &self.results {
            groups
                .entry((result.section.as_str(), result.mode.as_str()))
                .or_default()
                .count(result.passed);
        }
        groups
    }
}
