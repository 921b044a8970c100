//! Driving port for document mutations.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Document, Error};

/// Fields a caller may change on an existing document.
///
/// Merge semantics: `None` leaves the stored content untouched; a supplied
/// blob replaces it wholesale. The parent collection can never be patched.
#[derive(Debug, Clone, Default)]
pub struct DocumentPatch {
    /// Replacement content blob.
    pub content: Option<Value>,
}

/// Domain use-case port for mutating documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentsCommand: Send + Sync {
    /// Create a document under the collection.
    ///
    /// Content defaults to an empty object when the caller supplies none.
    /// The parent edge is stamped from the resolved path, never from the
    /// payload.
    async fn create(
        &self,
        account_id: &str,
        collection_id: &str,
        content: Option<Value>,
    ) -> Result<Document, Error>;

    /// Merge the patch over the stored document and persist the result.
    ///
    /// `document_id` is `None` when the route carried no target identifier;
    /// the operation then fails with an invalid-request error.
    async fn update<'a>(
        &self,
        account_id: &str,
        collection_id: &str,
        document_id: Option<&'a str>,
        patch: DocumentPatch,
    ) -> Result<Document, Error>;

    /// Delete a document and return the pre-deletion record.
    async fn remove<'a>(
        &self,
        account_id: &str,
        collection_id: &str,
        document_id: Option<&'a str>,
    ) -> Result<Document, Error>;
}
