//! Errors raised while stitching a report.

use std::path::PathBuf;

/// Failure while reading inputs or rewriting the results file.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// A file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The results file could not be rewritten.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Results file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The parameters are not valid JSON.
    #[error("invalid benchmark parameters: {0}")]
    InvalidParameters(#[from] serde_json::Error),

    /// The parameters are valid JSON but not an object.
    #[error("benchmark parameters must be a JSON object")]
    NotAnObject,
}
