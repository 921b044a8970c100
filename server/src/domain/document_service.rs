//! Document domain service.
//!
//! Implements the document driving ports. Every operation resolves the full
//! ownership chain through [`CollectionsQuery`] before touching document
//! state, so a broken link anywhere above the document fails the request
//! first. From this layer the chain has a single outcome: the parent
//! collection either resolved or it did not.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::domain::identifier;
use crate::domain::ports::{
    CollectionsQuery, DocumentPatch, DocumentRepository, DocumentRepositoryError,
    DocumentsCommand, DocumentsQuery,
};
use crate::domain::{CollectionId, Document, DocumentId, Error, ErrorCode};

/// Document service implementing the driving ports.
#[derive(Clone)]
pub struct DocumentService<R> {
    collections: Arc<dyn CollectionsQuery>,
    repo: Arc<R>,
}

impl<R> DocumentService<R> {
    /// Create a new service over the given collection resolver and repository.
    pub fn new(collections: Arc<dyn CollectionsQuery>, repo: Arc<R>) -> Self {
        Self { collections, repo }
    }
}

impl<R> DocumentService<R>
where
    R: DocumentRepository,
{
    fn map_repository_error(error: DocumentRepositoryError) -> Error {
        match error {
            DocumentRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("document repository unavailable: {message}"))
            }
            DocumentRepositoryError::Query { message } => {
                Error::internal(format!("document repository error: {message}"))
            }
            DocumentRepositoryError::MissingCollection { .. } => {
                Error::not_found("collection not found")
            }
        }
    }

    /// Resolve the ownership chain down to the parent collection.
    ///
    /// A missing account and a missing collection collapse into the same
    /// answer here: the parent did not resolve. Malformed identifiers and
    /// infrastructure failures pass through unchanged.
    async fn resolve_parent(
        &self,
        account_id: &str,
        collection_id: &str,
    ) -> Result<CollectionId, Error> {
        match self.collections.get(account_id, collection_id).await {
            Ok(collection) => Ok(collection.id()),
            Err(error) if error.code() == ErrorCode::NotFound => {
                Err(Error::not_found("collection not found"))
            }
            Err(error) => Err(error),
        }
    }
}

#[async_trait]
impl<R> DocumentsQuery for DocumentService<R>
where
    R: DocumentRepository,
{
    async fn list(&self, account_id: &str, collection_id: &str) -> Result<Vec<Document>, Error> {
        let parent = self.resolve_parent(account_id, collection_id).await?;
        self.repo
            .list_in_collection(&parent)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn get(
        &self,
        account_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<Document, Error> {
        let parent = self.resolve_parent(account_id, collection_id).await?;
        let id = DocumentId::from_uuid(identifier::parse_id(document_id, "documentId")?);
        self.repo
            .find_in_collection(&id, &parent)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found("document not found"))
    }
}

#[async_trait]
impl<R> DocumentsCommand for DocumentService<R>
where
    R: DocumentRepository,
{
    async fn create(
        &self,
        account_id: &str,
        collection_id: &str,
        content: Option<Value>,
    ) -> Result<Document, Error> {
        let parent = self.resolve_parent(account_id, collection_id).await?;
        let content = content.unwrap_or_else(|| json!({}));
        self.repo
            .insert(&parent, &content)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn update<'a>(
        &self,
        account_id: &str,
        collection_id: &str,
        document_id: Option<&'a str>,
        patch: DocumentPatch,
    ) -> Result<Document, Error> {
        self.resolve_parent(account_id, collection_id).await?;
        let document_id = identifier::require_id(document_id, "documentId")?;
        let existing = self.get(account_id, collection_id, document_id).await?;
        let merged = match patch.content {
            Some(content) => existing.with_content(content),
            None => existing,
        };
        self.repo
            .update(&merged)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found("document not found"))
    }

    async fn remove<'a>(
        &self,
        account_id: &str,
        collection_id: &str,
        document_id: Option<&'a str>,
    ) -> Result<Document, Error> {
        self.resolve_parent(account_id, collection_id).await?;
        let document_id = identifier::require_id(document_id, "documentId")?;
        let existing = self.get(account_id, collection_id, document_id).await?;
        let deleted = self
            .repo
            .delete(&existing.id())
            .await
            .map_err(Self::map_repository_error)?;
        if !deleted {
            return Err(Error::not_found("document not found"));
        }
        Ok(existing)
    }
}
