//! Core types, configuration, and errors for aossctl.
//!
//! This crate provides the building blocks shared by the request client, the
//! signer, and the command-line tools: identifiers for regions
//! and indices, the k-NN engine selector, and environment-driven
//! configuration.

mod config;
mod error;
mod types;

pub use config::AossConfig;
pub use error::{AossError, AossResult};
pub use types::{AwsRegion, IndexName, KnnEngine};
