//! Formatting errors reported in strict mode.

use thiserror::Error;

use crate::args::ArgKind;

/// Anomalies detected while interpreting a format string.
///
/// `offset` is the byte index of the directive's `%` in the format source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("directive at offset {offset} ends before its conversion character")]
    UnterminatedDirective { offset: usize },
    #[error("unknown conversion {conversion:?} at offset {offset}")]
    UnknownConversion { conversion: char, offset: usize },
    #[error("directive at offset {offset} has no argument left")]
    MissingArgument { offset: usize },
    #[error("directive at offset {offset} expects {expected}, got {found}")]
    ArgumentType {
        offset: usize,
        expected: ArgKind,
        found: ArgKind,
    },
    #[error("field value {value} at offset {offset} exceeds the limit of {max}")]
    FieldOverflow {
        offset: usize,
        value: usize,
        max: usize,
    },
    #[error("{unused} argument(s) left unconsumed")]
    UnusedArguments { unused: usize },
}

impl FormatError {
    /// Offset of the offending directive, if the error is tied to one.
    #[must_use]
    pub const fn offset(&self) -> Option<usize> {
        match *self {
            Self::UnterminatedDirective { offset }
            | Self::UnknownConversion { offset, .. }
            | Self::MissingArgument { offset }
            | Self::ArgumentType { offset, .. }
            | Self::FieldOverflow { offset, .. } => Some(offset),
            Self::UnusedArguments { .. } => None,
        }
    }
}
