//! HTTP transport seam.
//!
//! [`Transport`] executes a fully prepared, already signed request. Keeping it
//! behind a trait lets tests observe exactly what would go on the wire.

use std::borrow::Cow;

use async_trait::async_trait;
use bytes::Bytes;
use http::StatusCode;
use tracing::debug;

use crate::error::TransportError;

/// Status and body of a completed request.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Raw response body.
    pub body: Bytes,
}

impl ApiResponse {
    /// Create a response.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// The body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Executes prepared HTTP requests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and read the full response.
    async fn execute(&self, request: http::Request<Bytes>) -> Result<ApiResponse, TransportError>;
}

/// [`Transport`] backed by a [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with reqwest's default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: http::Request<Bytes>) -> Result<ApiResponse, TransportError> {
        let (parts, body) = request.into_parts();
        let url = parts.uri.to_string();

        let response = self
            .client
            .request(parts.method, url)
            .headers(parts.headers)
            .body(body)
            .send()
            .await
            .map_err(TransportError::Send)?;

        let status = response.status();
        let body = response.bytes().await.map_err(TransportError::Body)?;
        debug!(%status, bytes = body.len(), "read response body");

        Ok(ApiResponse { status, body })
    }
}
