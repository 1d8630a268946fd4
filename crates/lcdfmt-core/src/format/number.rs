//! Number writer.
//!
//! Decimal integers and fixed-point values written character by character,
//! following the display library's `print(long)` / `print(double, digits)`
//! conventions:
//!
//! - integers: optional `-`, then base-10 digits (`0` for zero);
//! - fixed-point: `nan` / `inf` / `ovf` for values the writer cannot show,
//!   otherwise optional `-`, the integer part after adding half a unit of the
//!   last printed digit, and `.` plus `digits` fractional digits when
//!   `digits > 0`.
//!
//! [`fixed_parts`] is the single place where a value is decomposed; the
//! length estimator goes through it too, so estimated and written lengths
//! cannot drift apart.

use crate::display::CharSink;

/// Largest magnitude the fixed-point writer prints; beyond it prints `ovf`.
pub const FIXED_OVERFLOW: f64 = 4_294_967_040.0;

/// Longest decimal rendering of a `u64`.
const MAX_DIGITS: usize = 20;

/// A fixed-point value split the way the writer prints it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FixedParts {
    /// Printed as a fixed word (`nan`, `inf`, `ovf`).
    Special(&'static [u8]),
    /// Sign, rounded integer part, and the fraction left after it.
    Finite {
        negative: bool,
        integer: u64,
        fraction: f64,
    },
}

/// Decompose `value` for printing with `digits` fractional digits.
#[must_use]
pub fn fixed_parts(value: f64, digits: u8) -> FixedParts {
    if value.is_nan() {
        return FixedParts::Special(b"nan");
    }
    if value.is_infinite() {
        return FixedParts::Special(b"inf");
    }
    if value > FIXED_OVERFLOW || value < -FIXED_OVERFLOW {
        return FixedParts::Special(b"ovf");
    }

    let negative = value < 0.0;
    let mut magnitude = if negative { -value } else { value };

    let mut rounding = 0.5;
    for _ in 0..digits {
        rounding /= 10.0;
    }
    magnitude += rounding;

    let integer = magnitude as u64;
    FixedParts::Finite {
        negative,
        integer,
        fraction: magnitude - integer as f64,
    }
}

/// Write `value` in base 10. Returns the number of characters written.
pub fn write_unsigned<S: CharSink + ?Sized>(sink: &mut S, mut value: u64) -> usize {
    let mut digits = [0u8; MAX_DIGITS];
    let mut pos = MAX_DIGITS;
    loop {
        pos -= 1;
        digits[pos] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    digits[pos..].iter().map(|&d| sink.write(d)).sum()
}

/// Write a signed integer. Returns the number of characters written.
pub fn write_integer<S: CharSink + ?Sized>(sink: &mut S, value: i64) -> usize {
    let mut n = 0;
    if value < 0 {
        n += sink.write(b'-');
    }
    n + write_unsigned(sink, value.unsigned_abs())
}

/// Write `value` with `digits` fractional digits. Returns the number of
/// characters written.
pub fn write_fixed<S: CharSink + ?Sized>(sink: &mut S, value: f64, digits: u8) -> usize {
    let (negative, integer, mut fraction) = match fixed_parts(value, digits) {
        FixedParts::Special(word) => return word.iter().map(|&b| sink.write(b)).sum(),
        FixedParts::Finite {
            negative,
            integer,
            fraction,
        } => (negative, integer, fraction),
    };

    let mut n = 0;
    if negative {
        n += sink.write(b'-');
    }
    n += write_unsigned(sink, integer);
    if digits > 0 {
        n += sink.write(b'.');
    }
    for _ in 0..digits {
        fraction *= 10.0;
        let digit = (fraction as u8).min(9);
        n += sink.write(b'0' + digit);
        fraction -= f64::from(digit);
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(value: f64, digits: u8) -> String {
        let mut out = Vec::new();
        let n = write_fixed(&mut out, value, digits);
        assert_eq!(n, out.len());
        String::from_utf8(out).unwrap()
    }

    fn integer(value: i64) -> String {
        let mut out = Vec::new();
        let n = write_integer(&mut out, value);
        assert_eq!(n, out.len());
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_write_integer() {
        assert_eq!(integer(0), "0");
        assert_eq!(integer(42), "42");
        assert_eq!(integer(-123), "-123");
        assert_eq!(integer(i64::MIN), "-9223372036854775808");
        assert_eq!(integer(i64::MAX), "9223372036854775807");
    }

    #[test]
    fn test_write_unsigned_max() {
        let mut out = Vec::new();
        write_unsigned(&mut out, u64::MAX);
        assert_eq!(out, b"18446744073709551615");
    }

    #[test]
    fn test_write_fixed_rounds_half_up() {
        assert_eq!(fixed(3.14, 1), "3.1");
        assert_eq!(fixed(3.1415926, 2), "3.14");
        assert_eq!(fixed(16.4533, 1), "16.5");
        assert_eq!(fixed(2.5, 0), "3");
        assert_eq!(fixed(9.96, 1), "10.0");
        assert_eq!(fixed(0.3, 1), "0.3");
    }

    #[test]
    fn test_write_fixed_negative() {
        assert_eq!(fixed(-3.14, 1), "-3.1");
        assert_eq!(fixed(-0.04, 1), "-0.0");
        assert_eq!(fixed(-0.5, 0), "-1");
    }

    #[test]
    fn test_write_fixed_zero_digits_has_no_point() {
        assert_eq!(fixed(7.2, 0), "7");
        assert_eq!(fixed(0.0, 0), "0");
    }

    #[test]
    fn test_write_fixed_specials() {
        assert_eq!(fixed(f64::NAN, 2), "nan");
        assert_eq!(fixed(f64::INFINITY, 2), "inf");
        assert_eq!(fixed(f64::NEG_INFINITY, 2), "inf");
        assert_eq!(fixed(5.0e9, 1), "ovf");
        assert_eq!(fixed(-5.0e9, 1), "ovf");
    }
}
