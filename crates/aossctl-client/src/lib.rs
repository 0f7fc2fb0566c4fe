//! Signed HTTP client and operation catalog for OpenSearch Serverless.
//!
//! The crate is split along the seams a run goes through:
//!
//! - [`transport`] executes prepared HTTP requests ([`ReqwestTransport`] in
//!   production, fakes in tests).
//! - [`client`] owns the endpoint configuration, default headers and signer,
//!   and exposes the `send` primitives every operation is built on.
//! - [`operations`] enumerates the supported operations.
//! - [`payload`] builds the request bodies, free of any I/O.
//! - [`request`] describes a planned request before it is sent.
//! - [`catalog`] plans each operation's request(s), runs them and renders
//!   the responses.

pub mod catalog;
pub mod client;
pub mod error;
pub mod operations;
pub mod payload;
pub mod request;
pub mod transport;

#[cfg(test)]
mod testing;

pub use catalog::{
    OperationArgs, build_requests, build_requests_with, run_operation, validate_args,
};
pub use client::{ClientConfig, OpenSearchClient};
pub use error::{CatalogError, ClientError, TransportError};
pub use operations::Operation;
pub use request::{OperationRequest, RequestBody};
pub use transport::{ApiResponse, ReqwestTransport, Transport};
