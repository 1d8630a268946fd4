//! Tagged argument list for the format interpreter.
//!
//! Each `%` directive consumes exactly one [`Arg`] (plus one more per `*`
//! width or precision). The caller builds the list explicitly, usually with
//! [`lcd_args!`](crate::lcd_args), so the interpreter never guesses at
//! argument widths or alignment.

use core::fmt;

/// One formatting argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arg<'a> {
    /// Text for `%s`, NUL-terminated or bounded by the slice.
    Text(&'a [u8]),
    /// Integer for `%d`, `%i`, `%u` and `*` width/precision.
    Int(i64),
    /// Value for `%f`; the digit count comes from the directive's precision.
    Float(f64),
    /// Display character code for `%c`.
    Char(u8),
}

/// The tag of an [`Arg`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    Text,
    Int,
    Float,
    Char,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Int => "integer",
            Self::Float => "float",
            Self::Char => "character",
        })
    }
}

impl Arg<'_> {
    /// The tag of this argument.
    #[must_use]
    pub const fn kind(&self) -> ArgKind {
        match self {
            Self::Text(_) => ArgKind::Text,
            Self::Int(_) => ArgKind::Int,
            Self::Float(_) => ArgKind::Float,
            Self::Char(_) => ArgKind::Char,
        }
    }

    /// Interpret this argument as a `*` width or precision.
    ///
    /// Floats truncate toward zero, characters yield their code. Text has no
    /// numeric reading.
    #[must_use]
    pub fn as_count(&self) -> Option<i64> {
        match *self {
            Self::Int(v) => Some(v),
            Self::Float(v) => Some(v as i64),
            Self::Char(c) => Some(i64::from(c)),
            Self::Text(_) => None,
        }
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for Arg<'a> {
    fn from(value: &'a [u8]) -> Self {
        Self::Text(value)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Arg<'a> {
    fn from(value: &'a [u8; N]) -> Self {
        Self::Text(value.as_slice())
    }
}

impl From<char> for Arg<'_> {
    /// Characters outside Latin-1 have no display code and become `?`.
    fn from(value: char) -> Self {
        Self::Char(u8::try_from(value).unwrap_or(b'?'))
    }
}

impl From<f32> for Arg<'_> {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Arg<'_> {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

macro_rules! int_arg_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Arg<'_> {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

int_arg_from!(i8, i16, i32, i64, u8, u16, u32);

/// Build an argument array for the format interpreter.
///
/// ```
/// use lcdfmt_core::{Arg, lcd_args};
///
/// let args = lcd_args![0, 2, 30, 'c', "text", 16.45];
/// assert_eq!(args[3], Arg::Char(b'c'));
/// ```
#[macro_export]
macro_rules! lcd_args {
    ($($arg:expr),* $(,)?) => {
        [$($crate::Arg::from($arg)),*]
    };
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// Position tracker over an argument list.
///
/// Advances by exactly one slot per consumed value and never reads past the
/// end of the list.
#[derive(Debug, Clone)]
pub struct ArgCursor<'s, 'a> {
    args: &'s [Arg<'a>],
    next: usize,
}

impl<'s, 'a> ArgCursor<'s, 'a> {
    #[must_use]
    pub const fn new(args: &'s [Arg<'a>]) -> Self {
        Self { args, next: 0 }
    }

    /// Take the next argument, or `None` once the list is exhausted.
    pub fn next_arg(&mut self) -> Option<Arg<'a>> {
        let arg = self.args.get(self.next).copied()?;
        self.next += 1;
        Some(arg)
    }

    /// Number of arguments taken so far.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.next
    }

    /// Number of arguments not yet taken.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.args.len() - self.next
    }
}
