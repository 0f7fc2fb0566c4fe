//! Common type definitions shared across the workspace.

use std::fmt;
use std::str::FromStr;

use crate::error::AossError;

/// AWS Region identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AwsRegion(String);

impl AwsRegion {
    /// Region used when none is configured.
    pub const DEFAULT: &str = "us-east-1";

    /// Create a new region.
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        Self(region.into())
    }

    /// Get the region as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AwsRegion {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for AwsRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of a search index. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct IndexName(String);

impl IndexName {
    /// Create an index name.
    ///
    /// # Errors
    /// Returns [`AossError::EmptyIndexName`] for empty or whitespace-only input.
    pub fn new(name: impl Into<String>) -> Result<Self, AossError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AossError::EmptyIndexName);
        }
        Ok(Self(name))
    }

    /// Get the index name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for IndexName {
    type Err = AossError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for IndexName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Vector engine backing a `knn_vector` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KnnEngine {
    /// Facebook AI Similarity Search.
    #[default]
    Faiss,
    /// Non-Metric Space Library.
    Nmslib,
    /// Apache Lucene's native HNSW implementation.
    Lucene,
}

impl KnnEngine {
    /// Returns the engine name as used in index mappings.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Faiss => "faiss",
            Self::Nmslib => "nmslib",
            Self::Lucene => "lucene",
        }
    }
}

impl FromStr for KnnEngine {
    type Err = AossError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "faiss" => Ok(Self::Faiss),
            "nmslib" => Ok(Self::Nmslib),
            "lucene" => Ok(Self::Lucene),
            _ => Err(AossError::UnknownEngine(s.to_owned())),
        }
    }
}

impl fmt::Display for KnnEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
