//! Field renderer (`printw`).
//!
//! Writes a value padded to a minimum width. The printed length is known
//! before the first character goes out (from the length estimator, or by
//! scanning text up to its terminator), so padding is emitted in place:
//!
//! - right-justified (default): `pad` x (width - len), then the value;
//! - left-justified: the value, then the padding.
//!
//! Total output is `max(width, len)`. Values wider than the field are never
//! truncated.

use crate::display::CharSink;
use crate::source::TextSource;

use super::length::{decimal_length, integer_length};
use super::number::{FixedParts, fixed_parts, write_fixed, write_integer};

/// Which side of the value receives the padding.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Justify {
    /// Padding first, value last.
    #[default]
    Right,
    /// Value first, padding last.
    Left,
}

/// Width and padding policy for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Minimum number of characters.
    pub width: usize,
    pub justify: Justify,
    /// Fill character, normally `' '` or `'0'`.
    pub pad: u8,
    /// Prefix non-negative numbers with `+`.
    pub force_sign: bool,
}

impl FieldSpec {
    /// Right-justified, space-padded field of `width` characters.
    #[must_use]
    pub const fn new(width: usize) -> Self {
        Self {
            width,
            justify: Justify::Right,
            pad: b' ',
            force_sign: false,
        }
    }

    #[must_use]
    pub const fn left(mut self) -> Self {
        self.justify = Justify::Left;
        self
    }

    #[must_use]
    pub const fn justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    #[must_use]
    pub const fn pad(mut self, pad: u8) -> Self {
        self.pad = pad;
        self
    }

    #[must_use]
    pub const fn force_sign(mut self, force: bool) -> Self {
        self.force_sign = force;
        self
    }

    /// Padding needed around a value of `len` characters.
    #[must_use]
    pub const fn padding_for(&self, len: usize) -> usize {
        self.width.saturating_sub(len)
    }
}

impl Default for FieldSpec {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Emit `value_len` characters produced by `body`, padded per `spec`.
fn emit_field<S, F>(sink: &mut S, spec: &FieldSpec, value_len: usize, body: F) -> usize
where
    S: CharSink + ?Sized,
    F: FnOnce(&mut S) -> usize,
{
    let padding = spec.padding_for(value_len);
    let mut n = 0;
    if spec.justify == Justify::Right {
        n += fill(sink, spec.pad, padding);
    }
    n += body(sink);
    if spec.justify == Justify::Left {
        n += fill(sink, spec.pad, padding);
    }
    n
}

fn fill<S: CharSink + ?Sized>(sink: &mut S, pad: u8, count: usize) -> usize {
    (0..count).map(|_| sink.write(pad)).sum()
}

/// Text field. The text ends at its terminator.
pub fn print_text_field<S, T>(sink: &mut S, spec: &FieldSpec, text: &T) -> usize
where
    S: CharSink + ?Sized,
    T: TextSource + ?Sized,
{
    emit_field(sink, spec, text.text_len(), |sink| {
        text.text_bytes().map(|b| sink.write(b)).sum()
    })
}

/// Integer field.
pub fn print_int_field<S: CharSink + ?Sized>(sink: &mut S, spec: &FieldSpec, value: i64) -> usize {
    let plus = spec.force_sign && value >= 0;
    emit_field(sink, spec, plus as usize + integer_length(value), |sink| {
        let mut n = 0;
        if plus {
            n += sink.write(b'+');
        }
        n + write_integer(sink, value)
    })
}

/// Fixed-point field with `digits` fractional digits.
pub fn print_fixed_field<S: CharSink + ?Sized>(
    sink: &mut S,
    spec: &FieldSpec,
    value: f64,
    digits: u8,
) -> usize {
    let plus = spec.force_sign
        && matches!(
            fixed_parts(value, digits),
            FixedParts::Finite {
                negative: false,
                ..
            }
        );
    emit_field(
        sink,
        spec,
        plus as usize + decimal_length(value, digits),
        |sink| {
            let mut n = 0;
            if plus {
                n += sink.write(b'+');
            }
            n + write_fixed(sink, value, digits)
        },
    )
}

/// Single-character field. A character is always one cell wide.
pub fn print_char_field<S: CharSink + ?Sized>(sink: &mut S, spec: &FieldSpec, ch: u8) -> usize {
    emit_field(sink, spec, 1, |sink| sink.write(ch))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> usize) -> (String, usize) {
        let mut out = Vec::new();
        let n = f(&mut out);
        (String::from_utf8(out).unwrap(), n)
    }

    #[test]
    fn test_int_right_justified() {
        let (s, n) = render(|o| print_int_field(o, &FieldSpec::new(5), 42));
        assert_eq!(s, "   42");
        assert_eq!(n, 5);
    }

    #[test]
    fn test_int_left_justified() {
        let (s, _) = render(|o| print_int_field(o, &FieldSpec::new(5).left(), 42));
        assert_eq!(s, "42   ");
    }

    #[test]
    fn test_int_zero_pad() {
        let (s, _) = render(|o| print_int_field(o, &FieldSpec::new(5).pad(b'0'), 42));
        assert_eq!(s, "00042");
        let (s, _) = render(|o| print_int_field(o, &FieldSpec::new(5).pad(b'0'), -42));
        assert_eq!(s, "00-42");
    }

    #[test]
    fn test_never_truncates() {
        let (s, n) = render(|o| print_int_field(o, &FieldSpec::new(2), 123_456));
        assert_eq!(s, "123456");
        assert_eq!(n, 6);
        let (s, _) = render(|o| print_text_field(o, &FieldSpec::new(1).left(), "wide"));
        assert_eq!(s, "wide");
    }

    #[test]
    fn test_text_field() {
        let (s, _) = render(|o| print_text_field(o, &FieldSpec::new(5), "ab"));
        assert_eq!(s, "   ab");
        let (s, _) = render(|o| print_text_field(o, &FieldSpec::new(4).left(), b"ab\0zz"));
        assert_eq!(s, "ab  ");
    }

    #[test]
    fn test_fixed_field() {
        let (s, n) = render(|o| print_fixed_field(o, &FieldSpec::new(5).left(), 3.14, 1));
        assert_eq!(s, "3.1  ");
        assert_eq!(n, 5);
        let (s, _) = render(|o| print_fixed_field(o, &FieldSpec::new(6), 9.96, 1));
        assert_eq!(s, "  10.0");
    }

    #[test]
    fn test_char_field() {
        let (s, _) = render(|o| print_char_field(o, &FieldSpec::new(3), b'A'));
        assert_eq!(s, "  A");
        let (s, _) = render(|o| print_char_field(o, &FieldSpec::new(3).left().pad(b'.'), b'A'));
        assert_eq!(s, "A..");
        let (s, _) = render(|o| print_char_field(o, &FieldSpec::new(0), b'A'));
        assert_eq!(s, "A");
    }

    #[test]
    fn test_force_sign() {
        let spec = FieldSpec::new(4).force_sign(true);
        let (s, _) = render(|o| print_int_field(o, &spec, 7));
        assert_eq!(s, "  +7");
        let (s, _) = render(|o| print_int_field(o, &spec, -7));
        assert_eq!(s, "  -7");
        let (s, _) = render(|o| print_fixed_field(o, &spec.left(), 0.0, 1));
        assert_eq!(s, "+0.0");
        let (s, _) = render(|o| print_fixed_field(o, &spec, f64::NAN, 1));
        assert_eq!(s, " nan");
    }

    #[test]
    fn test_output_length_is_max_of_width_and_value() {
        for width in 0..10 {
            for justify in [Justify::Right, Justify::Left] {
                let spec = FieldSpec::new(width).justify(justify);
                for value in [0i64, 7, -7, 1234, -98_765] {
                    let (s, n) = render(|o| print_int_field(o, &spec, value));
                    assert_eq!(n, s.len());
                    assert_eq!(n, width.max(integer_length(value)));
                }
                for (value, digits) in [(3.14, 1u8), (-0.5, 0), (100.0, 3)] {
                    let (_, n) = render(|o| print_fixed_field(o, &spec, value, digits));
                    assert_eq!(n, width.max(decimal_length(value, digits)));
                }
                let (_, n) = render(|o| print_text_field(o, &spec, "abc"));
                assert_eq!(n, width.max(3));
            }
        }
    }
}
