//! Length estimator.
//!
//! Printed character counts computed without rendering anything, so a field
//! renderer can emit its leading padding before the value itself.

use super::number::{FixedParts, fixed_parts};

/// Number of decimal digits in `value` (`1` for zero).
#[must_use]
pub const fn unsigned_length(mut value: u64) -> usize {
    let mut len = 1;
    while value >= 10 {
        value /= 10;
        len += 1;
    }
    len
}

/// Characters printed for `value`, including a leading `-`.
#[must_use]
pub const fn integer_length(value: i64) -> usize {
    (value < 0) as usize + unsigned_length(value.unsigned_abs())
}

/// Characters printed for `value` with `digits` fractional digits.
///
/// The integer part counts as [`integer_length`] of the value the writer
/// actually prints (after its half-unit rounding, keeping the sign of
/// negative values), plus one character for the decimal point and `digits`
/// characters when `digits > 0`. No decimal point is reserved for
/// `digits == 0`.
///
/// `integer_length(value as i64)` plus the fraction only agrees away from
/// rounding carries (`9.96` prints `10.0`) and the `(-1, 0)` range.
#[must_use]
pub fn decimal_length(value: f64, digits: u8) -> usize {
    match fixed_parts(value, digits) {
        FixedParts::Special(word) => word.len(),
        FixedParts::Finite {
            negative, integer, ..
        } => {
            let fraction = if digits > 0 { 1 + digits as usize } else { 0 };
            negative as usize + unsigned_length(integer) + fraction
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::number::{write_fixed, write_integer};

    #[test]
    fn zero_is_one_character() {
        assert_eq!(integer_length(0), 1);
        assert_eq!(unsigned_length(0), 1);
    }

    #[test]
    fn non_negative_matches_digit_count() {
        for (value, expected) in [
            (1, 1),
            (9, 1),
            (10, 2),
            (99, 2),
            (100, 3),
            (65_535, 5),
            (1_000_000, 7),
            (i64::MAX, 19),
        ] {
            assert_eq!(integer_length(value), expected, "value {value}");
        }
    }

    #[test]
    fn negative_adds_one_for_sign() {
        for value in [1i64, 7, 10, 12_345, 999_999_999, i64::MAX] {
            assert_eq!(integer_length(-value), integer_length(value) + 1);
        }
        assert_eq!(integer_length(i64::MIN), 20);
    }

    #[test]
    fn decimal_length_adds_point_and_digits() {
        for (value, digits) in [
            (3.14, 1u8),
            (3.14, 0),
            (123.456, 3),
            (-42.25, 1),
            (0.0, 2),
            (65_000.1, 4),
        ] {
            let truncated = value as i64;
            let extra = if digits > 0 { digits as usize + 1 } else { 0 };
            assert_eq!(
                decimal_length(value, digits),
                integer_length(truncated) + extra,
                "value {value} digits {digits}"
            );
        }
    }

    #[test]
    fn zero_digits_reserve_no_point() {
        assert_eq!(decimal_length(5.2, 0), 1);
        assert_eq!(decimal_length(-5.2, 0), 2);
    }

    #[test]
    fn decimal_length_follows_the_writer_across_rounding() {
        assert_eq!(decimal_length(9.96, 1), 4); // "10.0"
        assert_eq!(decimal_length(-0.04, 1), 4); // "-0.0"
        assert_eq!(decimal_length(f64::NAN, 3), 3);
        assert_eq!(decimal_length(1.0e12, 1), 3);
    }

    #[test]
    fn estimates_match_written_lengths() {
        let values = [
            0.0, 0.004, 0.5, 0.999, 1.0, 9.95, 9.96, 99.99, -0.001, -0.5, -9.99, 1234.5678,
            -98_765.4321, 4_294_967_000.0,
        ];
        for &value in &values {
            for digits in 0..6u8 {
                let mut out = Vec::new();
                let written = write_fixed(&mut out, value, digits);
                assert_eq!(
                    decimal_length(value, digits),
                    written,
                    "value {value} digits {digits} rendered {:?}",
                    String::from_utf8_lossy(&out)
                );
            }
        }
        for value in [0i64, 5, -5, 10, -10, 4_321, i64::MIN, i64::MAX] {
            let mut out = Vec::new();
            assert_eq!(integer_length(value), write_integer(&mut out, value));
        }
    }
}
