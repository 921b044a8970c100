//! Driving port for document reads.
//!
//! Operations mirror the collection port one level deeper: the full chain
//! (account, then collection) is resolved before any document data is
//! returned.

use async_trait::async_trait;

use crate::domain::{Document, Error};

/// Domain use-case port for reading documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentsQuery: Send + Sync {
    /// Return all documents in the collection.
    async fn list(&self, account_id: &str, collection_id: &str) -> Result<Vec<Document>, Error>;

    /// Resolve a document scoped to its parent collection.
    ///
    /// A document that exists under a different collection resolves exactly
    /// like an absent one: not found.
    async fn get(
        &self,
        account_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<Document, Error>;
}
