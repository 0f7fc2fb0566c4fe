//! Authenticated request client for one collection endpoint.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE, HOST};
use http::{HeaderMap, HeaderValue, Method};
use tracing::{debug, error};

use aossctl_auth::RequestSigner;
use aossctl_auth::canonical::encode_query;
use aossctl_core::AwsRegion;

use crate::error::ClientError;
use crate::request::{OperationRequest, RequestBody};
use crate::transport::{ApiResponse, Transport};

/// Content type for JSON request bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Content type for newline-delimited JSON bulk bodies.
pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

/// Endpoint-level configuration for [`OpenSearchClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Collection endpoint, e.g. `https://abc123.us-east-1.aoss.amazonaws.com`.
    pub endpoint: String,
    /// Region the collection lives in.
    pub region: AwsRegion,
    /// Service name bound into the signature scope.
    pub service_name: String,
}

impl ClientConfig {
    /// Create a configuration.
    pub fn new(
        endpoint: impl Into<String>,
        region: AwsRegion,
        service_name: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            region,
            service_name: service_name.into(),
        }
    }

    /// The host header value: the endpoint without scheme or trailing slash.
    #[must_use]
    pub fn host(&self) -> &str {
        let endpoint = self.endpoint.trim_end_matches('/');
        endpoint
            .strip_prefix("https://")
            .or_else(|| endpoint.strip_prefix("http://"))
            .unwrap_or(endpoint)
    }

    /// Build the full URL for `path` and an already encoded query string.
    #[must_use]
    pub fn url(&self, path: &str, query: &str) -> String {
        let base = self.endpoint.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if query.is_empty() {
            format!("{base}/{path}")
        } else {
            format!("{base}/{path}?{query}")
        }
    }
}

/// Signs and sends requests to a single collection endpoint.
///
/// Transport failures never escape: [`send`](Self::send) and
/// [`send_ndjson`](Self::send_ndjson) log the cause and return `None`.
pub struct OpenSearchClient {
    config: ClientConfig,
    default_headers: HeaderMap,
    transport: Arc<dyn Transport>,
    signer: Arc<dyn RequestSigner>,
}

impl fmt::Debug for OpenSearchClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenSearchClient")
            .field("config", &self.config)
            .field("default_headers", &self.default_headers)
            .field("transport", &"...")
            .field("signer", &"...")
            .finish()
    }
}

impl OpenSearchClient {
    /// Create a client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidEndpoint`] if the endpoint host is not a
    /// valid header value.
    pub fn new(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        signer: Arc<dyn RequestSigner>,
    ) -> Result<Self, ClientError> {
        let host = HeaderValue::from_str(config.host())
            .map_err(|_| ClientError::InvalidEndpoint(config.endpoint.clone()))?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        default_headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));
        default_headers.insert(HOST, host);

        Ok(Self {
            config,
            default_headers,
            transport,
            signer,
        })
    }

    /// Send a request with an optional JSON body.
    ///
    /// Returns `None` if the request could not be completed.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        query: &[(&str, &str)],
    ) -> Option<ApiResponse> {
        let payload = match json_payload(body) {
            Ok(payload) => payload,
            Err(e) => {
                error!(error = %e, %method, path, "Request failed");
                return None;
            }
        };
        self.dispatch(method, path, payload, JSON_CONTENT_TYPE, query)
            .await
    }

    /// Send a newline-delimited JSON payload.
    ///
    /// Returns `None` if the request could not be completed.
    pub async fn send_ndjson(
        &self,
        method: Method,
        path: &str,
        payload: String,
        query: &[(&str, &str)],
    ) -> Option<ApiResponse> {
        self.dispatch(method, path, Bytes::from(payload), NDJSON_CONTENT_TYPE, query)
            .await
    }

    /// Send a planned request, choosing the content type from its body.
    ///
    /// Returns `None` if the request could not be completed.
    pub async fn execute(&self, request: OperationRequest) -> Option<ApiResponse> {
        let OperationRequest {
            method,
            path,
            body,
            query,
        } = request;
        match body {
            Some(RequestBody::NdJson(payload)) => {
                self.send_ndjson(method, &path, payload, &query).await
            }
            Some(RequestBody::Json(value)) => self.send(method, &path, Some(&value), &query).await,
            None => self.send(method, &path, None, &query).await,
        }
    }

    /// Assemble an unsigned request carrying the default headers.
    pub fn build_request(
        &self,
        method: Method,
        path: &str,
        payload: Bytes,
        content_type: &'static str,
        query: &[(&str, &str)],
    ) -> Result<http::Request<Bytes>, ClientError> {
        let url = self.config.url(path, &encode_query(query));

        let mut request = http::Request::builder()
            .method(method)
            .uri(url)
            .body(payload)?;

        let headers = request.headers_mut();
        headers.extend(self.default_headers.clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));

        Ok(request)
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        payload: Bytes,
        content_type: &'static str,
        query: &[(&str, &str)],
    ) -> Option<ApiResponse> {
        match self
            .try_dispatch(method.clone(), path, payload, content_type, query)
            .await
        {
            Ok(response) => Some(response),
            Err(e) => {
                error!(error = %e, %method, path, "Request failed");
                None
            }
        }
    }

    async fn try_dispatch(
        &self,
        method: Method,
        path: &str,
        payload: Bytes,
        content_type: &'static str,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse, ClientError> {
        let mut request = self.build_request(method, path, payload, content_type, query)?;
        self.signer.sign(&mut request)?;

        debug!(
            method = %request.method(),
            uri = %request.uri(),
            bytes = request.body().len(),
            "sending signed request"
        );

        let response = self.transport.execute(request).await?;
        debug!(status = %response.status, "received response");
        Ok(response)
    }
}

/// Serialize an optional JSON body; no body is an empty payload.
fn json_payload(body: Option<&serde_json::Value>) -> Result<Bytes, ClientError> {
    match body {
        Some(value) => Ok(Bytes::from(serde_json::to_vec(value)?)),
        None => Ok(Bytes::new()),
    }
}
