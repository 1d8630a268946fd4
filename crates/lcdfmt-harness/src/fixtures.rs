//! JSON fixture sets: one file per family, each case naming the operation,
//! its inputs, and the panel or text output it must produce.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::HarnessError;

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Unique within the set.
    pub name: String,
    /// Operation under test (`printf`, `displayf`, `center`, ...).
    pub function: String,
    /// Behavior the case pins down, for reports.
    pub section: String,
    /// Input parameters; shape depends on `function`.
    pub inputs: serde_json::Value,
    /// Expected rendering. Panel operations render rows joined by `\n`.
    pub expected_output: String,
    /// Expected strict-mode error code, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_error: Option<String>,
    /// `lenient`, `strict` or `both`.
    pub mode: String,
}

/// A collection of fixture cases for one area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Fixture format version (`v1`).
    pub version: String,
    /// Area name, e.g. `printf/width`.
    pub family: String,
    /// UTC timestamp of capture.
    pub captured_at: String,
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Parse a set from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Pretty JSON, as stored on disk.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Read and parse one fixture file.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path).map_err(|source| HarnessError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_json(&content)?)
    }

    /// Load every `*.json` set in `dir`, sorted by file name.
    ///
    /// Unreadable files are skipped with a warning.
    pub fn load_dir(dir: &Path) -> Result<Vec<Self>, HarnessError> {
        let entries = std::fs::read_dir(dir).map_err(|source| HarnessError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let mut paths: Vec<_> = entries
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
            .collect();
        paths.sort();

        let mut sets = Vec::new();
        for path in paths {
            match Self::from_file(&path) {
                Ok(set) => sets.push(set),
                Err(err) => log::warn!("skipping {}: {err}", path.display()),
            }
        }
        Ok(sets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_set() {
        let set = FixtureSet::from_json(
            r#"{
                "version":"v1",
                "family":"printf/smoke",
                "captured_at":"2026-10-16T00:00:00Z",
                "cases":[
                    {"name":"pad","function":"printf","section":"width","inputs":{"format":"%3d","args":[{"int":7}]},"expected_output":"  7","mode":"both"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(set.cases.len(), 1);
        assert_eq!(set.cases[0].expected_error, None);
        let again = FixtureSet::from_json(&set.to_json().unwrap()).unwrap();
        assert_eq!(again.cases[0].name, "pad");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = FixtureSet::from_file(Path::new("/nonexistent/lcdfmt.json")).unwrap_err();
        assert!(matches!(err, HarnessError::Io { .. }));
    }
}
