//! Error types for the request client and operation catalog.

use aossctl_auth::AuthError;

use crate::operations::Operation;

/// Failure while executing a prepared request.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be sent (DNS, connect, TLS, timeout).
    #[error("request failed: {0}")]
    Send(#[source] reqwest::Error),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

/// Failure while preparing or sending a request.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The endpoint cannot be turned into a host header or URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The request could not be assembled.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] http::Error),

    /// The JSON body could not be serialized.
    #[error("failed to serialize request body: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The request could not be signed.
    #[error(transparent)]
    Signing(#[from] AuthError),

    /// The transport failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Failure while running a catalog operation.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The operation needs an index and none was given.
    #[error("Index name is required for this operation ({0})")]
    MissingIndex(Operation),

    /// The operation name is not in the catalog.
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// A successful response did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the rendered result failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
