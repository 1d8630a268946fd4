//! Harness errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported function '{0}'")]
    UnsupportedFunction(String),
    #[error("invalid argument '{0}', expected kind:value (text, int, float, char)")]
    BadArgument(String),
}
