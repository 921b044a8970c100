//! Port for document persistence.
//!
//! Mirrors the collection port one level deeper: lookups filter by the
//! document identifier and the parent collection in a single scoped query,
//! so cross-collection existence is never revealed.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{CollectionId, Document, DocumentId};

use super::define_repository_error;

define_repository_error! {
    /// Errors raised by document repository adapters.
    pub enum DocumentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "document repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "document repository query failed: {message}",
        /// The parent collection vanished between resolution and insert.
        MissingCollection { collection_id: String } =>
            "parent collection no longer exists: {collection_id}",
    }
}

/// Port for document storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Return all documents in the collection, in storage-native order.
    async fn list_in_collection(
        &self,
        parent: &CollectionId,
    ) -> Result<Vec<Document>, DocumentRepositoryError>;

    /// Fetch a document by identifier and parent in one scoped query.
    ///
    /// Returns `None` both when the identifier is absent and when the row
    /// exists under a different collection.
    async fn find_in_collection(
        &self,
        id: &DocumentId,
        parent: &CollectionId,
    ) -> Result<Option<Document>, DocumentRepositoryError>;

    /// Insert a new document under the collection with generated identifier
    /// and timestamps.
    ///
    /// Fails with [`DocumentRepositoryError::MissingCollection`] when the
    /// parent row was deleted after resolution (foreign key violation).
    async fn insert(
        &self,
        parent: &CollectionId,
        content: &Value,
    ) -> Result<Document, DocumentRepositoryError>;

    /// Persist a merged document record, refreshing its update timestamp.
    ///
    /// Returns `None` when the row no longer exists.
    async fn update(&self, document: &Document)
    -> Result<Option<Document>, DocumentRepositoryError>;

    /// Delete a document.
    ///
    /// Returns `false` when the row no longer exists.
    async fn delete(&self, id: &DocumentId) -> Result<bool, DocumentRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        DocumentRepositoryError::query("syntax"),
        "document repository query failed: syntax"
    )]
    #[case(
        DocumentRepositoryError::missing_collection("7e3f"),
        "parent collection no longer exists: 7e3f"
    )]
    fn errors_format_their_context(#[case] error: DocumentRepositoryError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }
}
