//! Error types for the aossctl core.

/// Core error type for aossctl.
#[derive(Debug, thiserror::Error)]
pub enum AossError {
    /// Index names may not be empty.
    #[error("index name must not be empty")]
    EmptyIndexName,

    /// Unrecognized k-NN engine name.
    #[error("unknown k-NN engine: {0} (expected faiss, nmslib or lucene)")]
    UnknownEngine(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience result type for core operations.
pub type AossResult<T> = Result<T, AossError>;
