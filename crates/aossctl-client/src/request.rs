//! Planned requests.

use http::Method;
use serde_json::Value;

/// Body carried by an [`OperationRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// A JSON document, sent as `application/json`.
    Json(Value),
    /// Newline-delimited JSON, sent as `application/x-ndjson`.
    NdJson(String),
}

/// One HTTP request an operation will issue, built before anything is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the endpoint, without a leading slash.
    pub path: String,
    /// Optional body.
    pub body: Option<RequestBody>,
    /// Unencoded query parameters, in order.
    pub query: Vec<(&'static str, &'static str)>,
}

impl OperationRequest {
    /// A request without body or query.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: Vec::new(),
        }
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    /// Attach an NDJSON body.
    #[must_use]
    pub fn ndjson(mut self, body: String) -> Self {
        self.body = Some(RequestBody::NdJson(body));
        self
    }

    /// Append query parameters.
    #[must_use]
    pub fn query(mut self, params: &[(&'static str, &'static str)]) -> Self {
        self.query.extend_from_slice(params);
        self
    }

    /// The JSON body, if any.
    #[must_use]
    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            Some(RequestBody::Json(value)) => Some(value),
            _ => None,
        }
    }
}
