//! Test execution engine.

use std::time::Instant;

use lcdfmt_core::Strictness;

use crate::config::mode_matches;
use crate::diff;
use crate::execute::execute_case;
use crate::fixtures::{FixtureCase, FixtureSet};
use crate::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};
use crate::verify::VerificationResult;

/// Runs a fixture set and collects verification results.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
    /// Interpreter mode being tested.
    pub mode: Strictness,
}

/// What one case produced, before it is turned into a result.
struct CaseRun {
    actual: String,
    passed: bool,
    diff: Option<String>,
    written: Option<usize>,
    anomaly: Option<String>,
}

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub fn new(campaign: impl Into<String>, mode: Strictness) -> Self {
        Self {
            campaign: campaign.into(),
            mode,
        }
    }

    /// Run all fixtures in a set and return results.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        self.cases(fixture_set)
            .map(|case| self.result(case, &self.execute(case)))
            .collect()
    }

    /// Like [`run`](Self::run), also writing one JSONL record per case.
    pub fn run_logged(
        &self,
        fixture_set: &FixtureSet,
        emitter: &mut LogEmitter,
    ) -> std::io::Result<Vec<VerificationResult>> {
        let mut results = Vec::new();
        for case in self.cases(fixture_set) {
            let started = Instant::now();
            let run = self.execute(case);
            let elapsed = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

            let (level, outcome) = if run.passed {
                (LogLevel::Info, Outcome::Pass)
            } else if run.written.is_none() {
                (LogLevel::Error, Outcome::Error)
            } else {
                (LogLevel::Warn, Outcome::Fail)
            };
            let mut entry = LogEntry::new(String::new(), level, "case_done")
                .with_mode(self.mode.as_str())
                .with_case(&fixture_set.family, &case.name, &case.function)
                .with_outcome(outcome)
                .with_duration_us(elapsed);
            if let Some(written) = run.written {
                entry = entry.with_written(written);
            }
            if let Some(anomaly) = &run.anomaly {
                entry = entry.with_anomaly(anomaly);
            }
            emitter.emit_entry(entry)?;
            results.push(self.result(case, &run));
        }
        Ok(results)
    }

    fn cases<'s>(&self, fixture_set: &'s FixtureSet) -> impl Iterator<Item = &'s FixtureCase> {
        let mode = self.mode;
        fixture_set
            .cases
            .iter()
            .filter(move |case| mode_matches(mode, &case.mode))
    }

    fn result(&self, case: &FixtureCase, run: &CaseRun) -> VerificationResult {
        VerificationResult {
            case_name: case.name.clone(),
            section: case.section.clone(),
            mode: self.mode.as_str().to_string(),
            passed: run.passed,
            expected: case.expected_output.clone(),
            actual: run.actual.clone(),
            diff: run.diff.clone(),
        }
    }

    fn execute(&self, case: &FixtureCase) -> CaseRun {
        log::debug!("[{}] {} ({})", self.campaign, case.name, self.mode.as_str());
        match execute_case(&case.function, &case.inputs, self.mode) {
            Ok(run) => {
                // lenient runs never carry an error code
                let expected_error = case
                    .expected_error
                    .as_deref()
                    .filter(|_| self.mode.is_strict());
                let mut notes = Vec::new();
                if run.error.as_deref() != expected_error {
                    notes.push(format!(
                        "error mismatch: expected={}, actual={}",
                        expected_error.unwrap_or("none"),
                        run.error.as_deref().unwrap_or("none")
                    ));
                }

                let output_matches = run.output == case.expected_output;
                let diff_out = if !output_matches {
                    let mut text = diff::render_diff(&case.expected_output, &run.output);
                    for note in &notes {
                        text.push_str(note);
                        text.push('\n');
                    }
                    Some(text)
                } else if !notes.is_empty() {
                    Some(notes.join("\n"))
                } else {
                    None
                };

                CaseRun {
                    passed: output_matches && notes.is_empty(),
                    actual: run.output,
                    diff: diff_out,
                    written: Some(run.written),
                    anomaly: run.anomaly,
                }
            }
            Err(err) => {
                log::warn!("case {} could not run: {err}", case.name);
                let actual = format!("unsupported:{err}");
                CaseRun {
                    passed: false,
                    diff: Some(diff::render_diff(&case.expected_output, &actual)),
                    actual,
                    written: None,
                    anomaly: None,
                }
            }
        }
    }
}
