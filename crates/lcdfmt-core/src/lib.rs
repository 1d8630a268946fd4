//! # lcdfmt-core
//!
//! Allocation-free text formatting for small character displays
//! (16x2-class HD44780 LCDs).
//!
//! The crate renders a miniature `printf` grammar straight to a device, one
//! character at a time, without an intermediate string buffer. Field padding
//! is computed up front from the printed length of each value, so nothing is
//! ever rendered twice.
//!
//! Layout:
//! - [`source`]: byte-addressed read-only text (format strings, `%s` values).
//! - [`args`]: the tagged argument list consumed by the interpreter.
//! - [`format`]: length estimator, number writer, field renderer, interpreter.
//! - [`display`]: device traits, the [`Lcd`] front-end, scrolling, and a
//!   simulated display for tests and tooling.
//!
//! No heap allocation happens anywhere in this crate.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod args;
pub mod config;
pub mod display;
pub mod error;
pub mod format;
pub mod source;

pub use args::{Arg, ArgCursor, ArgKind};
pub use config::{FormatConfig, Strictness};
pub use display::{CharDevice, CharSink, CountingSink, Lcd, ScrollSession, SliceSink, TextGrid};
pub use error::FormatError;
pub use format::field::{FieldSpec, Justify};
pub use format::printf::{Outcome, measure, render, vprintf};
pub use source::{TextSource, lower, upper};
