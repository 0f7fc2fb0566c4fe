//! Operation enum.

use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

/// All supported catalog operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    // Cluster inspection
    /// List every index in the collection.
    ListIndices,
    /// Show health, status and size columns for one index.
    GetIndexHealth,
    /// Show shard placement for one index.
    GetShardInfo,
    /// Show an index's settings followed by its mapping.
    GetIndexSettings,

    // Index management
    /// Create an index with a `knn_vector` field.
    CreateVectorIndex,
    /// Create an index with text and keyword fields.
    CreateTextIndex,

    // Vector documents
    /// Ingest one random vector.
    IngestVectorDoc,
    /// Ingest many random vectors in one bulk request.
    BulkIngestVectors,
    /// Run a k-NN query with a fixed query vector.
    SearchVectorDoc,

    // Text documents
    /// Add a fixed sample text document.
    AddTextDoc,
    /// Run a match query over the description field.
    SearchTextDoc,

    // Mixed documents
    /// Add a document mixing a vector with scalar fields.
    AddSpecificDoc,
    /// Run a boolean query over the mixed document fields.
    SearchSpecificDoc,

    // Whole-index document operations
    /// Page through documents in index order.
    GetAllDocuments,
    /// Delete documents matching a query (all by default).
    DeleteDocuments,
}

impl Operation {
    /// Every operation, in command-line listing order.
    pub const ALL: [Self; 15] = [
        Self::ListIndices,
        Self::CreateVectorIndex,
        Self::CreateTextIndex,
        Self::IngestVectorDoc,
        Self::BulkIngestVectors,
        Self::SearchVectorDoc,
        Self::GetIndexSettings,
        Self::DeleteDocuments,
        Self::GetAllDocuments,
        Self::GetIndexHealth,
        Self::GetShardInfo,
        Self::AddTextDoc,
        Self::SearchTextDoc,
        Self::AddSpecificDoc,
        Self::SearchSpecificDoc,
    ];

    /// Returns the command-line name of the operation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListIndices => "list_indices",
            Self::CreateVectorIndex => "create_vector_index",
            Self::CreateTextIndex => "create_text_index",
            Self::IngestVectorDoc => "ingest_vector_doc",
            Self::BulkIngestVectors => "bulk_ingest_vectors",
            Self::SearchVectorDoc => "search_vector_doc",
            Self::GetIndexSettings => "get_index_settings",
            Self::DeleteDocuments => "delete_documents",
            Self::GetAllDocuments => "get_all_documents",
            Self::GetIndexHealth => "get_index_health",
            Self::GetShardInfo => "get_shard_info",
            Self::AddTextDoc => "add_text_doc",
            Self::SearchTextDoc => "search_text_doc",
            Self::AddSpecificDoc => "add_specific_doc",
            Self::SearchSpecificDoc => "search_specific_doc",
        }
    }

    /// Parse a command-line operation name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == name)
    }

    /// Command-line names of every operation.
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::as_str).collect()
    }

    /// Whether the operation targets a specific index.
    #[must_use]
    pub fn requires_index(&self) -> bool {
        !matches!(self, Self::ListIndices)
    }
}

impl FromStr for Operation {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| CatalogError::UnknownOperation(s.to_owned()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_resolve_all_operations_by_name() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_name(op.as_str()), Some(op));
            assert_eq!(op.as_str().parse::<Operation>().unwrap(), op);
        }
    }

    #[test]
    fn test_should_have_unique_names() {
        let mut names = Operation::names();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Operation::ALL.len());
    }

    #[test]
    fn test_should_reject_unknown_operation() {
        assert!(Operation::from_name("drop_collection").is_none());
        assert!(matches!(
            "ListIndices".parse::<Operation>(),
            Err(CatalogError::UnknownOperation(_))
        ));
    }

    #[test]
    fn test_should_only_allow_list_indices_without_index() {
        let without_index: Vec<_> = Operation::ALL
            .into_iter()
            .filter(|op| !op.requires_index())
            .collect();
        assert_eq!(without_index, vec![Operation::ListIndices]);
    }
}
