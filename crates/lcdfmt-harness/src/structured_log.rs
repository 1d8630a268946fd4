//! JSONL run log.
//!
//! Every record is one JSON object per line. Four keys are always present
//! (`timestamp`, `trace_id`, `level`, `event`); case records add the fixture
//! family, case, function, mode and outcome. Trace ids read
//! `lcdfmt::<run_id>::<seq>` with a three-digit, one-based sequence.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const TRACE_PREFIX: &str = "lcdfmt";
const REQUIRED_KEYS: [&str; 4] = ["timestamp", "trace_id", "level", "event"];
const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const MODES: [&str; 2] = ["lenient", "strict"];
const OUTCOMES: [&str; 4] = ["pass", "fail", "skip", "error"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// How a fixture case ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
    Skip,
    /// The case could not be executed at all.
    Error,
}

/// One JSONL record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub trace_id: String,
    pub level: LogLevel,
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    /// `lenient` or `strict`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    /// Characters the operation reported written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub written: Option<usize>,
    /// First formatting anomaly met, as a message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anomaly: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_us: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl LogEntry {
    /// A record stamped with the current time. Pass an empty `trace_id` to
    /// let [`LogEmitter::emit_entry`] assign the next one.
    #[must_use]
    pub fn new(trace_id: impl Into<String>, level: LogLevel, event: impl Into<String>) -> Self {
        Self {
            timestamp: now_utc(),
            trace_id: trace_id.into(),
            level,
            event: event.into(),
            run_id: None,
            mode: None,
            family: None,
            case_name: None,
            function: None,
            outcome: None,
            written: None,
            anomaly: None,
            duration_us: None,
            details: None,
        }
    }

    #[must_use]
    pub fn with_run(self, run_id: impl Into<String>) -> Self {
        Self {
            run_id: Some(run_id.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_mode(self, mode: impl Into<String>) -> Self {
        Self {
            mode: Some(mode.into()),
            ..self
        }
    }

    /// Attach the fixture family, case name and function under test.
    #[must_use]
    pub fn with_case(
        self,
        family: impl Into<String>,
        case_name: impl Into<String>,
        function: impl Into<String>,
    ) -> Self {
        Self {
            family: Some(family.into()),
            case_name: Some(case_name.into()),
            function: Some(function.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_outcome(self, outcome: Outcome) -> Self {
        Self {
            outcome: Some(outcome),
            ..self
        }
    }

    #[must_use]
    pub fn with_written(self, written: usize) -> Self {
        Self {
            written: Some(written),
            ..self
        }
    }

    #[must_use]
    pub fn with_anomaly(self, anomaly: impl Into<String>) -> Self {
        Self {
            anomaly: Some(anomaly.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_duration_us(self, micros: u64) -> Self {
        Self {
            duration_us: Some(micros),
            ..self
        }
    }

    #[must_use]
    pub fn with_details(self, details: Value) -> Self {
        Self {
            details: Some(details),
            ..self
        }
    }

    /// The record as one line of JSON, without the newline.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

enum Target {
    File(BufWriter<File>),
    Memory(Vec<u8>),
}

impl Target {
    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::File(file) => file,
            Self::Memory(buf) => buf,
        }
    }
}

/// Appends records for one run, numbering their trace ids.
pub struct LogEmitter {
    target: Target,
    run_id: String,
    seq: u64,
}

impl LogEmitter {
    /// Truncate or create `path` and log into it.
    pub fn to_file(path: &Path, run_id: &str) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::with_target(Target::File(BufWriter::new(file)), run_id))
    }

    /// Keep records in memory; see [`captured`](Self::captured).
    #[must_use]
    pub fn to_buffer(run_id: &str) -> Self {
        Self::with_target(Target::Memory(Vec::new()), run_id)
    }

    fn with_target(target: Target, run_id: &str) -> Self {
        Self {
            target,
            run_id: run_id.to_owned(),
            seq: 0,
        }
    }

    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Text logged so far by an in-memory emitter. Empty for files.
    #[must_use]
    pub fn captured(&self) -> &str {
        match &self.target {
            Target::Memory(buf) => std::str::from_utf8(buf).unwrap_or_default(),
            Target::File(_) => "",
        }
    }

    fn next_trace_id(&mut self) -> String {
        self.seq += 1;
        format!("{TRACE_PREFIX}::{}::{:03}", self.run_id, self.seq)
    }

    /// Log a bare event and return the record written.
    pub fn emit(&mut self, level: LogLevel, event: &str) -> io::Result<LogEntry> {
        let entry =
            LogEntry::new(self.next_trace_id(), level, event).with_run(self.run_id.as_str());
        self.append(&entry)?;
        Ok(entry)
    }

    /// Log `entry`, filling in the trace id and run id when unset.
    pub fn emit_entry(&mut self, mut entry: LogEntry) -> io::Result<()> {
        if entry.trace_id.is_empty() {
            entry.trace_id = self.next_trace_id();
        }
        entry.run_id.get_or_insert_with(|| self.run_id.clone());
        self.append(&entry)
    }

    fn append(&mut self, entry: &LogEntry) -> io::Result<()> {
        let line = entry.to_jsonl().map_err(io::Error::other)?;
        writeln!(self.target.writer(), "{line}")
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.target.writer().flush()
    }
}

/// A schema violation on one line of a run log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogValidationError {
    pub line_number: usize,
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for LogValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.line_number, self.field, self.message)
    }
}

/// Collects the violations found on one line.
struct LineCheck {
    line_number: usize,
    errors: Vec<LogValidationError>,
}

impl LineCheck {
    fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(LogValidationError {
            line_number: self.line_number,
            field: field.to_owned(),
            message: message.into(),
        });
    }

    fn one_of(&mut self, record: &Map<String, Value>, field: &str, allowed: &[&str]) {
        if let Some(value) = record.get(field).and_then(Value::as_str)
            && !allowed.contains(&value)
        {
            self.fail(field, format!("'{value}' is not one of {allowed:?}"));
        }
    }

    fn record(&mut self, record: &Map<String, Value>) {
        for key in REQUIRED_KEYS {
            if !record.contains_key(key) {
                self.fail(key, "missing");
            }
        }
        self.one_of(record, "level", &LEVELS);
        self.one_of(record, "mode", &MODES);
        self.one_of(record, "outcome", &OUTCOMES);

        let has_case = record.get("case_name").is_some_and(Value::is_string);
        if record.contains_key("outcome") && !has_case {
            self.fail("case_name", "case records need a case_name");
        }
        if let Some(trace_id) = record.get("trace_id").and_then(Value::as_str) {
            let parts: Vec<&str> = trace_id.split("::").collect();
            if parts.len() != 3 || parts[0] != TRACE_PREFIX {
                self.fail(
                    "trace_id",
                    format!("expected {TRACE_PREFIX}::<run>::<seq>, got '{trace_id}'"),
                );
            }
        }
    }
}

/// Check one line of a run log and decode it.
pub fn validate_log_line(
    line: &str,
    line_number: usize,
) -> Result<LogEntry, Vec<LogValidationError>> {
    let mut check = LineCheck {
        line_number,
        errors: Vec::new(),
    };
    let value = match serde_json::from_str::<Value>(line) {
        Ok(Value::Object(record)) => {
            check.record(&record);
            Value::Object(record)
        }
        Ok(_) => {
            check.fail("<root>", "not a JSON object");
            return Err(check.errors);
        }
        Err(err) => {
            check.fail("<json>", err.to_string());
            return Err(check.errors);
        }
    };
    if !check.errors.is_empty() {
        return Err(check.errors);
    }
    serde_json::from_value(value).map_err(|err| {
        check.fail("<record>", err.to_string());
        check.errors
    })
}

/// Check every non-blank line of a run log. Returns the number of records
/// and all violations.
pub fn validate_log_file(path: &Path) -> io::Result<(usize, Vec<LogValidationError>)> {
    let content = std::fs::read_to_string(path)?;
    let records = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let mut count = 0;
    let mut errors = Vec::new();
    for (index, line) in records {
        count += 1;
        if let Err(found) = validate_log_line(line.trim(), index + 1) {
            errors.extend(found);
        }
    }
    Ok((count, errors))
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
#[must_use]
pub fn now_utc() -> String {
    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format_utc(since_epoch.as_secs(), since_epoch.subsec_millis())
}

fn format_utc(secs: u64, millis: u32) -> String {
    let (year, month, day) = civil_from_days(secs / 86_400);
    let of_day = secs % 86_400;
    format!(
        "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}.{millis:03}Z",
        of_day / 3600,
        of_day % 3600 / 60,
        of_day % 60,
    )
}

/// Proleptic Gregorian date for a day count since 1970-01-01.
fn civil_from_days(days: u64) -> (u64, u64, u64) {
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z % 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + u64::from(month <= 2);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case_record() -> LogEntry {
        LogEntry::new("lcdfmt::run-1::001", LogLevel::Info, "case_done")
            .with_mode("strict")
            .with_case("printf/width", "pad_int", "printf")
            .with_outcome(Outcome::Pass)
            .with_written(5)
    }

    #[test]
    fn bare_record_has_only_required_keys() {
        let line = LogEntry::new("lcdfmt::run-1::001", LogLevel::Warn, "run_start")
            .to_jsonl()
            .unwrap();
        let record: Value = serde_json::from_str(&line).unwrap();
        let keys: Vec<&String> = record.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 4, "{keys:?}");
        assert_eq!(record["level"], "warn");
        assert_eq!(record["event"], "run_start");
    }

    #[test]
    fn case_record_validates_and_decodes() {
        let entry = case_record();
        let decoded = validate_log_line(&entry.to_jsonl().unwrap(), 1).unwrap();
        assert_eq!(decoded, entry);
    }

    #[test]
    fn missing_trace_id_is_reported() {
        let line = r#"{"timestamp":"t","level":"info","event":"x"}"#;
        let errors = validate_log_line(line, 7).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "trace_id");
        assert_eq!(errors[0].to_string(), "7:trace_id: missing");
    }

    #[test]
    fn unknown_mode_and_level_are_reported() {
        let line = r#"{"timestamp":"t","trace_id":"lcdfmt::r::001","level":"loud","event":"x","mode":"hardened"}"#;
        let errors = validate_log_line(line, 3).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["level", "mode"]);
    }

    #[test]
    fn outcome_without_case_is_reported() {
        let line = r#"{"timestamp":"t","trace_id":"lcdfmt::r::001","level":"info","event":"x","outcome":"pass"}"#;
        let errors = validate_log_line(line, 1).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "case_name"));
    }

    #[test]
    fn malformed_lines() {
        assert_eq!(validate_log_line("{", 1).unwrap_err()[0].field, "<json>");
        assert_eq!(validate_log_line("[1]", 1).unwrap_err()[0].field, "<root>");
        let foreign = r#"{"timestamp":"t","trace_id":"other::r::001","level":"info","event":"x"}"#;
        assert_eq!(validate_log_line(foreign, 1).unwrap_err()[0].field, "trace_id");
    }

    #[test]
    fn emitter_numbers_records_and_fills_run_id() {
        let mut emitter = LogEmitter::to_buffer("run-42");
        let first = emitter.emit(LogLevel::Info, "start").unwrap();
        assert_eq!(first.trace_id, "lcdfmt::run-42::001");
        assert_eq!(first.run_id.as_deref(), Some("run-42"));

        emitter
            .emit_entry(LogEntry::new("", LogLevel::Info, "case_done"))
            .unwrap();
        let lines: Vec<&str> = emitter.captured().lines().collect();
        assert_eq!(lines.len(), 2);
        let second = validate_log_line(lines[1], 2).unwrap();
        assert_eq!(second.trace_id, "lcdfmt::run-42::002");
        assert_eq!(second.run_id.as_deref(), Some("run-42"));
    }

    #[test]
    fn utc_formatting() {
        assert_eq!(format_utc(0, 0), "1970-01-01T00:00:00.000Z");
        assert_eq!(format_utc(951_782_400, 5), "2000-02-29T00:00:00.005Z");
        assert_eq!(format_utc(1_791_936_000 + 3_723, 0), "2026-10-14T01:02:03.000Z");
    }
}
