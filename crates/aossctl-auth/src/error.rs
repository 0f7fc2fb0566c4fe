//! Error types for credential resolution and request signing.

/// Errors that can occur while resolving credentials or signing a request.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No credentials could be discovered from the environment.
    #[error("No valid credentials found: {0}")]
    NoCredentials(String),

    /// The request has neither a `host` header nor an authority in its URI.
    #[error("Request has no host to sign")]
    MissingHost,

    /// A header value to be signed is not visible ASCII.
    #[error("Invalid value for header: {0}")]
    InvalidHeaderValue(String),
}

/// Errors raised by the external credential refresh helper.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    /// The credential tool is not installed or not on `PATH`.
    #[error("{0} CLI not found. Please install {0} first.")]
    ToolNotFound(String),

    /// The credential tool ran and exited unsuccessfully.
    #[error("{tool} exited with {status}")]
    Failed {
        /// Program that was invoked.
        tool: String,
        /// Exit status reported by the process.
        status: std::process::ExitStatus,
    },

    /// The credential tool could not be spawned.
    #[error("Failed to run {tool}: {source}")]
    Spawn {
        /// Program that was invoked.
        tool: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
