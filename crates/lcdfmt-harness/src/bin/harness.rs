//! CLI entrypoint for the lcdfmt conformance harness.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lcdfmt_core::Strictness;
use lcdfmt_harness::execute::{ArgValue, execute_case};
use lcdfmt_harness::structured_log::{LogEmitter, LogLevel};
use lcdfmt_harness::{ConformanceReport, FixtureSet, TestRunner, VerificationSummary, config};

/// Conformance tooling for lcdfmt.
#[derive(Debug, Parser)]
#[command(name = "lcdfmt-harness")]
#[command(about = "Conformance testing harness for lcdfmt")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Verify the formatter against fixture sets.
    Verify {
        /// Directory containing fixture JSON files.
        #[arg(long, default_value = "tests/fixtures")]
        fixture: PathBuf,
        /// Output report path (markdown; JSON is written alongside).
        #[arg(long)]
        report: Option<PathBuf>,
        /// Structured JSONL log path.
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Render one format string and print the result.
    Render {
        /// Format string.
        format: String,
        /// Arguments as kind:value (int:42, float:3.14, text:hi, char:x).
        #[arg(long = "arg")]
        args: Vec<ArgValue>,
        /// Interpreter mode; defaults to $LCDFMT_MODE, then lenient.
        #[arg(long)]
        mode: Option<String>,
        /// Render onto the simulated 16x2 panel at this column/row.
        #[arg(long, num_args = 2, value_names = ["COL", "ROW"])]
        at: Option<Vec<u8>>,
        /// Apply the `+` flag.
        #[arg(long)]
        force_sign: bool,
    },
    /// Diff two rendered outputs stored in files.
    Diff {
        expected: PathBuf,
        actual: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Verify {
            fixture,
            report,
            log,
        } => {
            eprintln!("Verifying against fixtures in {}", fixture.display());
            let fixture_sets = FixtureSet::load_dir(&fixture)?;
            if fixture_sets.is_empty() {
                return Err(format!("No fixture JSON files found in {}", fixture.display()).into());
            }

            let runners = [
                TestRunner::new("fixture-verify", Strictness::Lenient),
                TestRunner::new("fixture-verify", Strictness::Strict),
            ];
            let mut emitter = match &log {
                Some(path) => Some(LogEmitter::to_file(path, "verify")?),
                None => None,
            };
            if let Some(emitter) = emitter.as_mut() {
                emitter.emit(LogLevel::Info, "verify_start")?;
            }

            let mut results = Vec::new();
            for set in &fixture_sets {
                for runner in &runners {
                    match emitter.as_mut() {
                        Some(emitter) => results.extend(runner.run_logged(set, emitter)?),
                        None => results.extend(runner.run(set)),
                    }
                }
            }

            let summary = VerificationSummary::from_results(results);
            let report_doc = ConformanceReport {
                title: String::from("lcdfmt Conformance Report"),
                mode: String::from("lenient+strict"),
                timestamp: lcdfmt_harness::structured_log::now_utc(),
                summary,
            };

            eprintln!(
                "Verification complete: total={}, passed={}, failed={}",
                report_doc.summary.total, report_doc.summary.passed, report_doc.summary.failed
            );
            for failure in report_doc.summary.failures() {
                eprintln!("FAIL {} ({})", failure.case_name, failure.mode);
                if let Some(diff) = &failure.diff {
                    eprintln!("{diff}");
                }
            }

            if let Some(emitter) = emitter.as_mut() {
                emitter.emit(LogLevel::Info, "verify_done")?;
                emitter.flush()?;
            }

            if let Some(report_path) = report {
                eprintln!("Writing report to {}", report_path.display());
                std::fs::write(&report_path, report_doc.to_markdown())?;
                let json_path = report_path.with_extension("json");
                std::fs::write(&json_path, report_doc.to_json())?;
            }

            if !report_doc.summary.all_passed() {
                return Err("Conformance verification failed".into());
            }
        }
        Command::Render {
            format,
            args,
            mode,
            at,
            force_sign,
        } => {
            let strictness = mode
                .as_deref()
                .map_or_else(config::default_strictness, Strictness::from_str_loose);
            let (function, inputs) = match at.as_deref() {
                Some(&[col, row]) => (
                    "displayf",
                    serde_json::json!({
                        "format": format, "args": args, "col": col, "row": row,
                        "force_sign": force_sign
                    }),
                ),
                _ => (
                    "printf",
                    serde_json::json!({"format": format, "args": args, "force_sign": force_sign}),
                ),
            };
            let run = execute_case(function, &inputs, strictness)?;
            println!("{}", run.output);
            eprintln!("written={} mode={}", run.written, strictness.as_str());
            if let Some(anomaly) = &run.anomaly {
                eprintln!("anomaly: {anomaly}");
            }
            if let Some(code) = run.error {
                return Err(format!("format error: {code}").into());
            }
        }
        Command::Diff { expected, actual } => {
            let expected = std::fs::read_to_string(&expected)?;
            let actual = std::fs::read_to_string(&actual)?;
            let diff = lcdfmt_harness::diff::render_diff(
                expected.trim_end_matches('\n'),
                actual.trim_end_matches('\n'),
            );
            println!("{diff}");
        }
    }

    Ok(())
}
