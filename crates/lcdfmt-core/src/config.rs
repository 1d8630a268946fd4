//! Formatting configuration.
//!
//! Two interpreter modes:
//! - `lenient` (default): the historical best-effort behavior. The interpreter
//!   never fails; anomalies such as a missing argument or an unknown
//!   conversion are repaired deterministically and logged.
//! - `strict`: rendering stops at the first anomaly and the caller receives a
//!   [`FormatError`](crate::FormatError). Characters already emitted stay on
//!   the device.

/// How the interpreter reacts to a malformed format or argument mismatch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strictness {
    /// Best effort: repair, log, keep going.
    #[default]
    Lenient,
    /// Report the first anomaly as an error.
    Strict,
}

impl Strictness {
    /// Parse from string (case-insensitive). Unknown input means lenient.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        let s = s.trim();
        if s.eq_ignore_ascii_case("strict") || s.eq_ignore_ascii_case("checked") {
            Self::Strict
        } else {
            Self::Lenient
        }
    }

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lenient => "lenient",
            Self::Strict => "strict",
        }
    }

    #[must_use]
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Knobs for the format interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatConfig {
    /// Error policy.
    pub strictness: Strictness,
    /// Render a `+` before non-negative numbers when a directive carries the
    /// `+` flag. Off by default: the flag is parsed but has no effect.
    pub honor_force_sign: bool,
    /// Fractional digits for `%f` when the directive gives no precision.
    pub default_precision: u8,
}

/// Fractional digits used by `%f` without an explicit precision.
pub const DEFAULT_PRECISION: u8 = 2;

impl FormatConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strictness: Strictness::Lenient,
            honor_force_sign: false,
            default_precision: DEFAULT_PRECISION,
        }
    }

    #[must_use]
    pub const fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    #[must_use]
    pub const fn with_force_sign(mut self, honor: bool) -> Self {
        self.honor_force_sign = honor;
        self
    }

    #[must_use]
    pub const fn with_default_precision(mut self, digits: u8) -> Self {
        self.default_precision = digits;
        self
    }

    /// Shorthand for a strict copy of this configuration.
    #[must_use]
    pub const fn strict(self) -> Self {
        self.with_strictness(Strictness::Strict)
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self::new()
    }
}
