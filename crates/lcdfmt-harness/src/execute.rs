//! Fixture execution against `lcdfmt-core`.
//!
//! Text operations render into a byte buffer; panel operations drive an
//! [`Lcd`] over a simulated 16x2 [`TextGrid`] and report its rows.

use std::str::FromStr;

use lcdfmt_core::display::SCROLL_INTERVAL_MS;
use lcdfmt_core::format::number::write_fixed;
use lcdfmt_core::{
    Arg, FormatConfig, FormatError, Lcd, ScrollSession, Strictness, TextGrid, measure, render,
};
use serde::{Deserialize, Serialize};

use crate::HarnessError;

pub const PANEL_COLS: u8 = 16;
pub const PANEL_ROWS: u8 = 2;

type Panel = TextGrid<{ PANEL_COLS as usize }, { PANEL_ROWS as usize }>;

/// One formatting argument as written in fixtures: `{"int": 42}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgValue {
    Text(String),
    Int(i64),
    Float(f64),
    Char(char),
}

impl ArgValue {
    #[must_use]
    pub fn as_arg(&self) -> Arg<'_> {
        match self {
            Self::Text(s) => Arg::Text(s.as_bytes()),
            Self::Int(v) => Arg::Int(*v),
            Self::Float(v) => Arg::Float(*v),
            Self::Char(c) => Arg::from(*c),
        }
    }
}

/// Command-line form: `int:42`, `float:3.14`, `text:hello`, `char:x`.
impl FromStr for ArgValue {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || HarnessError::BadArgument(s.to_string());
        let (kind, value) = s.split_once(':').ok_or_else(bad)?;
        match kind {
            "text" | "s" => Ok(Self::Text(value.to_string())),
            "int" | "d" => value.trim().parse().map(Self::Int).map_err(|_| bad()),
            "float" | "f" => value.trim().parse().map(Self::Float).map_err(|_| bad()),
            "char" | "c" => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Self::Char(c)),
                    _ => Err(bad()),
                }
            }
            _ => Err(bad()),
        }
    }
}

/// Stable snake-case code for a formatting error.
#[must_use]
pub fn error_code(err: &FormatError) -> &'static str {
    match err {
        FormatError::UnterminatedDirective { .. } => "unterminated_directive",
        FormatError::UnknownConversion { .. } => "unknown_conversion",
        FormatError::MissingArgument { .. } => "missing_argument",
        FormatError::ArgumentType { .. } => "argument_type",
        FormatError::FieldOverflow { .. } => "field_overflow",
        FormatError::UnusedArguments { .. } => "unused_arguments",
    }
}

/// Result of running one case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Execution {
    /// Rendered text, or panel rows joined by `\n`.
    pub output: String,
    /// Characters reported written by the operation.
    pub written: usize,
    /// Strict-mode error code.
    pub error: Option<String>,
    /// First anomaly met, as a message, in either mode.
    pub anomaly: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FormatInputs {
    format: String,
    #[serde(default)]
    args: Vec<ArgValue>,
    #[serde(default)]
    col: u8,
    #[serde(default)]
    row: u8,
    #[serde(default)]
    force_sign: bool,
    #[serde(default)]
    default_precision: Option<u8>,
}

impl FormatInputs {
    fn config(&self, strictness: Strictness) -> FormatConfig {
        let config = FormatConfig::new()
            .with_strictness(strictness)
            .with_force_sign(self.force_sign);
        match self.default_precision {
            Some(digits) => config.with_default_precision(digits),
            None => config,
        }
    }

    fn args(&self) -> Vec<Arg<'_>> {
        self.args.iter().map(ArgValue::as_arg).collect()
    }
}

#[derive(Debug, Deserialize)]
struct TextInputs {
    text: String,
    #[serde(default)]
    row: u8,
}

#[derive(Debug, Deserialize)]
struct ScrollInputs {
    text: String,
    width: u8,
    frames: usize,
    #[serde(default)]
    col: u8,
    #[serde(default)]
    row: u8,
}

#[derive(Debug, Deserialize)]
struct FixedInputs {
    value: f64,
    digits: u8,
}

/// Run `function` with `inputs` under `strictness`.
pub fn execute_case(
    function: &str,
    inputs: &serde_json::Value,
    strictness: Strictness,
) -> Result<Execution, HarnessError> {
    log::debug!("executing {function} ({})", strictness.as_str());
    match function {
        "printf" => run_printf(&decode(inputs)?, strictness),
        "measure" => {
            let inputs: FormatInputs = decode(inputs)?;
            let n = measure(inputs.format.as_str(), &inputs.args(), &inputs.config(strictness));
            Ok(plain(n.to_string(), n))
        }
        "displayf" => run_displayf(&decode(inputs)?, strictness),
        "centerf" => {
            let inputs: FormatInputs = decode(inputs)?;
            let mut lcd = panel(inputs.config(strictness));
            let n = lcd.centerf(inputs.row, inputs.format.as_str(), &inputs.args());
            Ok(plain(lcd.device().to_string(), n))
        }
        "center" => {
            let inputs: TextInputs = decode(inputs)?;
            let mut lcd = panel(FormatConfig::new());
            let n = lcd.center(inputs.row, inputs.text.as_str());
            Ok(plain(lcd.device().to_string(), n))
        }
        "scroll" => run_scroll(&decode(inputs)?),
        "print_fixed" => {
            let inputs: FixedInputs = decode(inputs)?;
            let mut out = Vec::new();
            let n = write_fixed(&mut out, inputs.value, inputs.digits);
            Ok(plain(String::from_utf8_lossy(&out).into_owned(), n))
        }
        other => Err(HarnessError::UnsupportedFunction(other.to_string())),
    }
}

fn decode<T: serde::de::DeserializeOwned>(inputs: &serde_json::Value) -> Result<T, HarnessError> {
    Ok(T::deserialize(inputs)?)
}

fn plain(output: String, written: usize) -> Execution {
    Execution {
        output,
        written,
        error: None,
        anomaly: None,
    }
}

fn panel(config: FormatConfig) -> Lcd<Panel> {
    let mut lcd = Lcd::new(Panel::new()).with_config(config);
    lcd.begin(PANEL_COLS, PANEL_ROWS);
    lcd
}

fn run_printf(inputs: &FormatInputs, strictness: Strictness) -> Result<Execution, HarnessError> {
    let mut out = Vec::new();
    let outcome = render(
        &mut out,
        inputs.format.as_str(),
        &inputs.args(),
        &inputs.config(strictness),
    );
    Ok(Execution {
        output: String::from_utf8_lossy(&out).into_owned(),
        written: outcome.written,
        error: outcome
            .anomaly
            .filter(|_| strictness.is_strict())
            .map(|err| error_code(&err).to_string()),
        anomaly: outcome.anomaly.map(|err| err.to_string()),
    })
}

/// Positions the cursor, then renders straight into the panel so a strict
/// stop still reports the characters already shown.
fn run_displayf(inputs: &FormatInputs, strictness: Strictness) -> Result<Execution, HarnessError> {
    let config = inputs.config(strictness);
    let mut lcd = panel(config);
    lcd.set_cursor(inputs.col, inputs.row);
    let outcome = render(lcd.device_mut(), inputs.format.as_str(), &inputs.args(), &config);
    Ok(Execution {
        output: lcd.device().to_string(),
        written: outcome.written,
        error: outcome
            .anomaly
            .filter(|_| strictness.is_strict())
            .map(|err| error_code(&err).to_string()),
        anomaly: outcome.anomaly.map(|err| err.to_string()),
    })
}

/// Frames are the `width` cells under the marquee, joined by `|`.
fn run_scroll(inputs: &ScrollInputs) -> Result<Execution, HarnessError> {
    let mut lcd = panel(FormatConfig::new());
    let mut session = ScrollSession::new(0);
    let start = usize::from(inputs.col);
    let end = (start + usize::from(inputs.width)).min(usize::from(PANEL_COLS));
    let mut frames = Vec::with_capacity(inputs.frames);
    let mut written = 0;
    let mut now = 0u32;

    while frames.len() < inputs.frames {
        now = now.wrapping_add(SCROLL_INTERVAL_MS);
        let Some(n) = lcd.scroll(
            inputs.col,
            inputs.row,
            inputs.text.as_str(),
            inputs.width,
            &mut session,
            now,
        ) else {
            continue;
        };
        written += n;
        let cells = lcd
            .device()
            .row(usize::from(inputs.row))
            .map(|row| String::from_utf8_lossy(&row[start.min(end)..end]).into_owned())
            .unwrap_or_default();
        frames.push(cells);
    }
    Ok(plain(frames.join("|"), written))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_cli_arguments() {
        assert_eq!("int:42".parse::<ArgValue>().unwrap(), ArgValue::Int(42));
        assert_eq!("f:1.5".parse::<ArgValue>().unwrap(), ArgValue::Float(1.5));
        assert_eq!("text:a:b".parse::<ArgValue>().unwrap(), ArgValue::Text("a:b".into()));
        assert_eq!("char:x".parse::<ArgValue>().unwrap(), ArgValue::Char('x'));
        assert!("char:xy".parse::<ArgValue>().is_err());
        assert!("int:abc".parse::<ArgValue>().is_err());
        assert!("42".parse::<ArgValue>().is_err());
    }

    #[test]
    fn printf_case() {
        let inputs = json!({"format": "%-5.1f|", "args": [{"float": 3.14}]});
        let run = execute_case("printf", &inputs, Strictness::Lenient).unwrap();
        assert_eq!(run.output, "3.1  |");
        assert_eq!(run.written, 6);
        assert_eq!(run.error, None);
    }

    #[test]
    fn strict_printf_reports_code() {
        let inputs = json!({"format": "a%d"});
        let lenient = execute_case("printf", &inputs, Strictness::Lenient).unwrap();
        assert_eq!(lenient.error, None);
        assert!(lenient.anomaly.is_some());
        let strict = execute_case("printf", &inputs, Strictness::Strict).unwrap();
        assert_eq!(strict.output, "a");
        assert_eq!(strict.error.as_deref(), Some("missing_argument"));
    }

    #[test]
    fn displayf_case_renders_panel() {
        let inputs = json!({
            "col": 1, "row": 1,
            "format": "%01i:%02i:%02i",
            "args": [{"int": 0}, {"int": 2}, {"int": 30}]
        });
        let run = execute_case("displayf", &inputs, Strictness::Strict).unwrap();
        assert_eq!(run.output, "                \n 0:02:30        ");
        assert_eq!(run.written, 7);
    }

    #[test]
    fn strict_displayf_keeps_partial_count() {
        let inputs = json!({"format": "T=%d"});
        let run = execute_case("displayf", &inputs, Strictness::Strict).unwrap();
        assert_eq!(run.output, "T=              \n                ");
        assert_eq!(run.written, 2);
        assert_eq!(run.error.as_deref(), Some("missing_argument"));

        let lenient = execute_case("displayf", &inputs, Strictness::Lenient).unwrap();
        assert_eq!((lenient.written, lenient.error), (2, None));
        assert!(lenient.anomaly.is_some());
    }

    #[test]
    fn scroll_case() {
        let inputs = json!({"text": "abc", "width": 2, "frames": 4});
        let run = execute_case("scroll", &inputs, Strictness::Lenient).unwrap();
        assert_eq!(run.output, "ab|bc|c |ab");
        assert_eq!(run.written, 8);
    }

    #[test]
    fn unknown_function() {
        let err = execute_case("sprintf", &json!({}), Strictness::Lenient).unwrap_err();
        assert!(matches!(err, HarnessError::UnsupportedFunction(_)));
    }

    #[test]
    fn malformed_inputs() {
        let err = execute_case("printf", &json!({"args": []}), Strictness::Lenient).unwrap_err();
        assert!(matches!(err, HarnessError::Json(_)));
    }
}
