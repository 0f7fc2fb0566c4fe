//! AWS credential resolution and Signature Version 4 request signing.
//!
//! This crate covers the client side of AWS authentication: discovering the
//! caller's credentials, optionally refreshing short-lived ones through an
//! external tool, and signing outgoing HTTP requests so an OpenSearch
//! Serverless collection accepts them.
//!
//! # Usage
//!
//! ```rust
//! use aossctl_auth::credentials::Credentials;
//! use aossctl_auth::sigv4::{RequestSigner, SigV4Signer};
//!
//! let credentials = Credentials::new("AKIDEXAMPLE", "secret", None);
//! let signer = SigV4Signer::new(credentials, "us-east-1", "aoss");
//!
//! let mut request = http::Request::builder()
//!     .method("GET")
//!     .uri("https://example.us-east-1.aoss.amazonaws.com/_cat/indices")
//!     .header("host", "example.us-east-1.aoss.amazonaws.com")
//!     .body(bytes::Bytes::new())
//!     .unwrap();
//! signer.sign(&mut request).unwrap();
//! assert!(request.headers().contains_key(http::header::AUTHORIZATION));
//! ```
//!
//! # Modules
//!
//! - [`canonical`] - Canonical request construction for SigV4
//! - [`credentials`] - Credential model and credential sources
//! - [`error`] - Authentication error types
//! - [`refresh`] - External credential refresh helper
//! - [`sigv4`] - SigV4 request signing

pub mod canonical;
pub mod credentials;
pub mod error;
pub mod refresh;
pub mod sigv4;

pub use credentials::{AmbientCredentialSource, CredentialSource, Credentials, StaticCredentialSource};
pub use error::{AuthError, RefreshError};
pub use refresh::refresh_credentials;
pub use sigv4::{RequestSigner, SigV4Signer, hash_payload};
