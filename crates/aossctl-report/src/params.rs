//! Benchmark parameters file.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::ReportError;

/// Placeholder rendered for parameters absent from the file.
pub const UNKNOWN: &str = "unknown";

/// Index mode assumed when the parameters do not name one.
pub const DEFAULT_MODE: &str = "in_memory";

/// A flat JSON object of benchmark parameters.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkParameters {
    values: Map<String, Value>,
}

impl BenchmarkParameters {
    /// Parse parameters from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidParameters`] for malformed JSON and
    /// [`ReportError::NotAnObject`] when the top level is not an object.
    pub fn from_json(text: &str) -> Result<Self, ReportError> {
        match serde_json::from_str(text)? {
            Value::Object(values) => Ok(Self { values }),
            _ => Err(ReportError::NotAnObject),
        }
    }

    /// Read and parse a parameters file.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Read`] if the file cannot be read, otherwise as
    /// [`from_json`](Self::from_json).
    pub fn from_file(path: &Path) -> Result<Self, ReportError> {
        let text = std::fs::read_to_string(path).map_err(|source| ReportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Render the value of `key`: strings as-is, anything else as JSON text,
    /// and [`UNKNOWN`] when absent.
    #[must_use]
    pub fn display(&self, key: &str) -> String {
        self.display_or(key, UNKNOWN)
    }

    /// The index mode, defaulting to [`DEFAULT_MODE`].
    #[must_use]
    pub fn mode(&self) -> String {
        self.display_or("mode", DEFAULT_MODE)
    }

    fn display_or(&self, key: &str, fallback: &str) -> String {
        match self.values.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => fallback.to_owned(),
        }
    }
}
