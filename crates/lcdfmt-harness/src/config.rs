//! Harness-wide defaults.
//!
//! The interpreter mode used when a command does not name one is read from
//! the `LCDFMT_MODE` environment variable:
//! - `lenient` (default): best-effort rendering, anomalies repaired and logged.
//! - `strict`: stop at the first anomaly and report it.

use std::sync::OnceLock;

use lcdfmt_core::Strictness;

/// Environment variable selecting the default mode.
pub const MODE_ENV: &str = "LCDFMT_MODE";

static DEFAULT_MODE: OnceLock<Strictness> = OnceLock::new();

/// Get the configured mode (reads env var on first call, caches thereafter).
#[must_use]
pub fn default_strictness() -> Strictness {
    *DEFAULT_MODE.get_or_init(|| {
        std::env::var(MODE_ENV)
            .map(|v| Strictness::from_str_loose(&v))
            .unwrap_or_default()
    })
}

/// Whether a fixture declared for `case_mode` runs under `active`.
#[must_use]
pub fn mode_matches(active: Strictness, case_mode: &str) -> bool {
    let case = case_mode.trim();
    case.eq_ignore_ascii_case("both") || case.eq_ignore_ascii_case(active.as_str())
}
