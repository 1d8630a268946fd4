//! Format interpreter.
//!
//! Reads a format source byte by byte and renders each directive straight to
//! the sink. Grammar:
//!
//! ```text
//! % [-] [+] [0...] [digits | *]... [. [digits | *]...] conversion
//! ```
//!
//! - `%%` writes a literal `%` and consumes no argument.
//! - `-` left-justifies; `+` requests a sign (applied only when
//!   [`FormatConfig::honor_force_sign`] is set); a run of `0` pads with zeros.
//! - Width and precision digits accumulate into whichever side of the `.` is
//!   active; `*` takes the next argument instead. Each `.` restarts the
//!   precision at zero.
//! - Conversions: `s` text, `d`/`i`/`u` integer, `f` fixed-point (precision
//!   is the digit count), `c` character. Any other byte is handled like `c`.
//!   `c` also takes an integer, written as the character with that code.
//!
//! Width is a minimum: values wider than the field are written in full.
//! Width and precision saturate at [`MAX_FIELD`].
//!
//! In lenient mode rendering never fails. Anomalies are repaired as follows
//! and logged at `warn`:
//! - missing argument: empty text padded to the width;
//! - argument of the wrong kind: rendered by its own kind inside the field;
//! - unknown conversion: treated as `%c`;
//! - directive cut off by the end of the format: written verbatim;
//! - `*` with a negative or missing value: no padding / default precision.
//!
//! In strict mode the first anomaly stops rendering and is returned.

use core::ops::ControlFlow;

use crate::args::{Arg, ArgCursor, ArgKind};
use crate::config::FormatConfig;
use crate::display::{CharSink, CountingSink};
use crate::error::FormatError;
use crate::source::TextSource;

use super::field::{
    FieldSpec, Justify, print_char_field, print_fixed_field, print_int_field, print_text_field,
};

/// Upper bound for width and precision.
pub const MAX_FIELD: usize = u8::MAX as usize;

// ---------------------------------------------------------------------------
// Directive types
// ---------------------------------------------------------------------------

/// Conversion character of a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// `s`
    Text,
    /// `d`, `i`, `u`
    Integer,
    /// `f`
    Fixed,
    /// `c`
    Char,
    /// Anything else; rendered like `c`.
    Unknown(u8),
}

impl Conversion {
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            b's' => Self::Text,
            b'd' | b'i' | b'u' => Self::Integer,
            b'f' => Self::Fixed,
            b'c' => Self::Char,
            other => Self::Unknown(other),
        }
    }

    /// Argument kind the conversion consumes.
    #[must_use]
    pub const fn expected_kind(self) -> ArgKind {
        match self {
            Self::Text => ArgKind::Text,
            Self::Integer => ArgKind::Int,
            Self::Fixed => ArgKind::Float,
            Self::Char | Self::Unknown(_) => ArgKind::Char,
        }
    }

    /// `%c` and the unknown-conversion fallback write one character.
    #[must_use]
    pub const fn is_char(self) -> bool {
        matches!(self, Self::Char | Self::Unknown(_))
    }

    /// Whether `kind` is a well-typed argument for this conversion. `%c`
    /// takes an integer as a character code; unknown conversions are
    /// reported on their own and take anything.
    #[must_use]
    pub const fn accepts(self, kind: ArgKind) -> bool {
        match self {
            Self::Unknown(_) => true,
            Self::Char => matches!(kind, ArgKind::Char | ArgKind::Int),
            Self::Text => matches!(kind, ArgKind::Text),
            Self::Integer => matches!(kind, ArgKind::Int),
            Self::Fixed => matches!(kind, ArgKind::Float),
        }
    }
}

/// One parsed `%...` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive {
    /// Byte offset of the `%` in the format source.
    pub offset: usize,
    pub left_justify: bool,
    pub force_sign: bool,
    pub pad: u8,
    pub width: usize,
    /// `None` until a `.` is seen.
    pub precision: Option<usize>,
    pub conversion: Conversion,
}

impl Directive {
    const fn new(offset: usize) -> Self {
        Self {
            offset,
            left_justify: false,
            force_sign: false,
            pad: b' ',
            width: 0,
            precision: None,
            conversion: Conversion::Char,
        }
    }

    /// Field policy for this directive.
    #[must_use]
    pub const fn field(&self, config: &FormatConfig) -> FieldSpec {
        FieldSpec::new(self.width)
            .justify(if self.left_justify {
                Justify::Left
            } else {
                Justify::Right
            })
            .pad(self.pad)
            .force_sign(self.force_sign && config.honor_force_sign)
    }

    /// Fractional digits for `%f`.
    #[must_use]
    pub fn digits(&self, config: &FormatConfig) -> u8 {
        self.precision
            .map_or(config.default_precision, |p| u8::try_from(p).unwrap_or(u8::MAX))
    }
}

/// Result of one interpreter run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct Outcome {
    /// Characters written to the sink (literals and all directive output).
    pub written: usize,
    /// First anomaly met. In strict mode rendering stopped there.
    pub anomaly: Option<FormatError>,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Interpret `format` against `args`, writing to `sink`.
pub fn render<S, F>(sink: &mut S, format: &F, args: &[Arg<'_>], config: &FormatConfig) -> Outcome
where
    S: CharSink + ?Sized,
    F: TextSource + ?Sized,
{
    let mut interpreter = Interpreter {
        sink,
        format,
        pos: 0,
        args: ArgCursor::new(args),
        config,
        written: 0,
        anomaly: None,
    };
    let _ = interpreter.run();
    Outcome {
        written: interpreter.written,
        anomaly: interpreter.anomaly,
    }
}

/// Like [`render`], but surfaces the anomaly as an error in strict mode.
///
/// With a lenient configuration this always returns `Ok`.
pub fn vprintf<S, F>(
    sink: &mut S,
    format: &F,
    args: &[Arg<'_>],
    config: &FormatConfig,
) -> Result<usize, FormatError>
where
    S: CharSink + ?Sized,
    F: TextSource + ?Sized,
{
    let outcome = render(sink, format, args, config);
    match outcome.anomaly {
        Some(err) if config.strictness.is_strict() => Err(err),
        _ => Ok(outcome.written),
    }
}

/// Number of characters `format` renders to, without a device.
pub fn measure<F: TextSource + ?Sized>(
    format: &F,
    args: &[Arg<'_>],
    config: &FormatConfig,
) -> usize {
    let mut counter = CountingSink::new();
    render(&mut counter, format, args, config).written
}

// ---------------------------------------------------------------------------
// Interpreter
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
enum Accumulator {
    Width,
    Precision,
}

struct Interpreter<'r, 's, 'a, S: ?Sized, F: ?Sized> {
    sink: &'r mut S,
    format: &'r F,
    pos: usize,
    args: ArgCursor<'s, 'a>,
    config: &'r FormatConfig,
    written: usize,
    anomaly: Option<FormatError>,
}

impl<S, F> Interpreter<'_, '_, '_, S, F>
where
    S: CharSink + ?Sized,
    F: TextSource + ?Sized,
{
    /// Next format byte; stays on the terminator once reached.
    fn read(&mut self) -> u8 {
        let byte = self.format.read_byte(self.pos);
        if byte != 0 {
            self.pos += 1;
        }
        byte
    }

    fn run(&mut self) -> ControlFlow<()> {
        loop {
            match self.read() {
                0 => break,
                b'%' => self.directive(self.pos - 1)?,
                byte => self.written += self.sink.write(byte),
            }
        }
        let unused = self.args.remaining();
        if unused > 0 {
            self.report(FormatError::UnusedArguments { unused })?;
        }
        ControlFlow::Continue(())
    }

    /// Record an anomaly. Strict mode stops here.
    fn report(&mut self, err: FormatError) -> ControlFlow<()> {
        if self.anomaly.is_none() {
            self.anomaly = Some(err);
        }
        if self.config.strictness.is_strict() {
            log::debug!("format rendering stopped: {err}");
            ControlFlow::Break(())
        } else {
            log::warn!("format anomaly repaired: {err}");
            ControlFlow::Continue(())
        }
    }

    fn directive(&mut self, offset: usize) -> ControlFlow<()> {
        let mut t = self.read();
        if t == b'%' {
            self.written += self.sink.write(b'%');
            return ControlFlow::Continue(());
        }

        let mut d = Directive::new(offset);
        if t == b'-' {
            d.left_justify = true;
            t = self.read();
        }
        if t == b'+' {
            d.force_sign = true;
            t = self.read();
        }
        while t == b'0' {
            d.pad = b'0';
            t = self.read();
        }

        let mut active = Accumulator::Width;
        loop {
            match t {
                b'.' => {
                    active = Accumulator::Precision;
                    d.precision = Some(0);
                }
                b'0'..=b'9' => {
                    let slot = match active {
                        Accumulator::Width => &mut d.width,
                        Accumulator::Precision => d.precision.get_or_insert(0),
                    };
                    *slot = slot.saturating_mul(10).saturating_add(usize::from(t - b'0'));
                }
                b'*' => {
                    let value = self.star(offset)?;
                    match active {
                        Accumulator::Width => {
                            d.width = value.map_or(0, |v| usize::try_from(v).unwrap_or(0));
                        }
                        Accumulator::Precision => {
                            d.precision = value.and_then(|v| usize::try_from(v).ok());
                        }
                    }
                }
                _ => break,
            }
            t = self.read();
        }

        if t == 0 {
            return self.unterminated(offset);
        }
        d.conversion = Conversion::from_byte(t);
        self.clamp(&mut d)?;
        self.dispatch(&d)
    }

    /// Pull a `*` width or precision from the argument list.
    fn star(&mut self, offset: usize) -> ControlFlow<(), Option<i64>> {
        match self.args.next_arg() {
            Some(Arg::Int(v)) => ControlFlow::Continue(Some(v)),
            Some(other) => {
                self.report(FormatError::ArgumentType {
                    offset,
                    expected: ArgKind::Int,
                    found: other.kind(),
                })?;
                ControlFlow::Continue(other.as_count())
            }
            None => {
                self.report(FormatError::MissingArgument { offset })?;
                ControlFlow::Continue(None)
            }
        }
    }

    fn clamp(&mut self, d: &mut Directive) -> ControlFlow<()> {
        if d.width > MAX_FIELD {
            self.report(FormatError::FieldOverflow {
                offset: d.offset,
                value: d.width,
                max: MAX_FIELD,
            })?;
            d.width = MAX_FIELD;
        }
        if let Some(precision) = d.precision.filter(|&p| p > MAX_FIELD) {
            self.report(FormatError::FieldOverflow {
                offset: d.offset,
                value: precision,
                max: MAX_FIELD,
            })?;
            d.precision = Some(MAX_FIELD);
        }
        ControlFlow::Continue(())
    }

    /// The format ended inside a directive: write what was read verbatim.
    fn unterminated(&mut self, offset: usize) -> ControlFlow<()> {
        self.report(FormatError::UnterminatedDirective { offset })?;
        for addr in offset..self.pos {
            self.written += self.sink.write(self.format.read_byte(addr));
        }
        ControlFlow::Continue(())
    }

    fn dispatch(&mut self, d: &Directive) -> ControlFlow<()> {
        let field = d.field(self.config);

        if let Conversion::Unknown(byte) = d.conversion {
            self.report(FormatError::UnknownConversion {
                conversion: char::from(byte),
                offset: d.offset,
            })?;
        }

        let Some(arg) = self.args.next_arg() else {
            self.report(FormatError::MissingArgument { offset: d.offset })?;
            self.written += print_text_field(self.sink, &field, b"");
            return ControlFlow::Continue(());
        };

        if !d.conversion.accepts(arg.kind()) {
            self.report(FormatError::ArgumentType {
                offset: d.offset,
                expected: d.conversion.expected_kind(),
                found: arg.kind(),
            })?;
        }

        self.written += match arg {
            // character code, e.g. a CGRAM glyph slot
            Arg::Int(code) if d.conversion.is_char() => {
                print_char_field(self.sink, &field, code as u8)
            }
            Arg::Text(text) => print_text_field(self.sink, &field, text),
            Arg::Int(value) => print_int_field(self.sink, &field, value),
            Arg::Float(value) => {
                print_fixed_field(self.sink, &field, value, d.digits(self.config))
            }
            Arg::Char(ch) => print_char_field(self.sink, &field, ch),
        };
        ControlFlow::Continue(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
