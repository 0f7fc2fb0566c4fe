//! Test doubles shared by the unit tests in this crate.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};

use aossctl_auth::{Credentials, RequestSigner, SigV4Signer};
use aossctl_core::AwsRegion;

use crate::client::{ClientConfig, OpenSearchClient};
use crate::error::TransportError;
use crate::transport::{ApiResponse, ReqwestTransport, Transport};

pub(crate) const TEST_ENDPOINT: &str = "https://abc123.us-east-1.aoss.amazonaws.com";

/// A request as it reached the transport.
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: Method,
    pub uri: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Transport that records requests and replays canned responses in order.
///
/// Once the canned responses run out it answers `200 {}`.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingTransport {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responses: Arc<Mutex<VecDeque<ApiResponse>>>,
}

impl RecordingTransport {
    pub fn with_responses(responses: Vec<ApiResponse>) -> Self {
        Self {
            requests: Arc::default(),
            responses: Arc::new(Mutex::new(responses.into())),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, request: http::Request<Bytes>) -> Result<ApiResponse, TransportError> {
        let (parts, body) = request.into_parts();
        self.requests.lock().unwrap().push(RecordedRequest {
            method: parts.method,
            uri: parts.uri.to_string(),
            headers: parts.headers,
            body: String::from_utf8(body.to_vec()).unwrap(),
        });

        let next = self.responses.lock().unwrap().pop_front();
        Ok(next.unwrap_or_else(|| ApiResponse::new(StatusCode::OK, "{}")))
    }
}

pub(crate) fn test_signer() -> Arc<dyn RequestSigner> {
    Arc::new(SigV4Signer::new(
        Credentials::new("AKIDEXAMPLE", "secret", Some("token".to_owned())),
        "us-east-1",
        "aoss",
    ))
}

pub(crate) fn test_client(transport: RecordingTransport) -> OpenSearchClient {
    let config = ClientConfig::new(TEST_ENDPOINT, AwsRegion::default(), "aoss");
    OpenSearchClient::new(config, Arc::new(transport), test_signer()).unwrap()
}

/// Client whose endpoint refuses connections.
pub(crate) fn unreachable_client() -> OpenSearchClient {
    let config = ClientConfig::new("http://127.0.0.1:9", AwsRegion::default(), "aoss");
    OpenSearchClient::new(config, Arc::new(ReqwestTransport::new()), test_signer()).unwrap()
}
