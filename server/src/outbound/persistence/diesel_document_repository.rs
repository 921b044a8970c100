//! PostgreSQL-backed document repository using Diesel ORM.
//!
//! Thin adapter translating between Diesel rows and domain documents. Content
//! is stored as `jsonb` and passed through untouched. Lookups are scoped to
//! the parent collection; the foreign key guards insert races against
//! concurrent collection deletion.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::ports::{DocumentRepository, DocumentRepositoryError};
use crate::domain::{CollectionId, Document, DocumentId};

use super::diesel_error_mapping::{
    ConstraintViolation, QueryFailure, classify_diesel_error, constraint_violation,
    pool_error_message,
};
use super::models::{DocumentRow, DocumentUpdate, NewDocumentRow};
use super::pool::{DbPool, PoolError};
use super::schema::documents;

/// Diesel-backed implementation of the document repository port.
#[derive(Clone)]
pub struct DieselDocumentRepository {
    pool: DbPool,
}

impl DieselDocumentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain document repository errors.
fn map_pool_error(error: PoolError) -> DocumentRepositoryError {
    DocumentRepositoryError::connection(pool_error_message(error))
}

/// Map Diesel errors to domain document repository errors.
fn map_diesel_error(error: diesel::result::Error) -> DocumentRepositoryError {
    match classify_diesel_error(&error) {
        QueryFailure::Query(message) => DocumentRepositoryError::query(message),
        QueryFailure::Connection(message) => DocumentRepositoryError::connection(message),
    }
}

/// Map insert errors, intercepting the foreign key to the parent collection.
fn map_insert_error(
    error: diesel::result::Error,
    collection_id: CollectionId,
) -> DocumentRepositoryError {
    match constraint_violation(&error) {
        Some(ConstraintViolation::ForeignKey) => {
            DocumentRepositoryError::missing_collection(collection_id)
        }
        _ => map_diesel_error(error),
    }
}

/// Convert a database row to a domain document.
fn row_to_document(row: DocumentRow) -> Document {
    Document::new(
        DocumentId::from_uuid(row.id),
        row.content,
        CollectionId::from_uuid(row.collection_id),
        row.created_at,
        row.updated_at,
    )
}

#[async_trait]
impl DocumentRepository for DieselDocumentRepository {
    async fn list_in_collection(
        &self,
        collection_id: &CollectionId,
    ) -> Result<Vec<Document>, DocumentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<DocumentRow> = documents::table
            .filter(documents::collection_id.eq(*collection_id.as_uuid()))
            .order(documents::created_at.asc())
            .select(DocumentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_document).collect())
    }

    async fn find_in_collection(
        &self,
        id: &DocumentId,
        collection_id: &CollectionId,
    ) -> Result<Option<Document>, DocumentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<DocumentRow> = documents::table
            .filter(
                documents::id
                    .eq(*id.as_uuid())
                    .and(documents::collection_id.eq(*collection_id.as_uuid())),
            )
            .select(DocumentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_document))
    }

    async fn insert(
        &self,
        collection_id: &CollectionId,
        content: &Value,
    ) -> Result<Document, DocumentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let now = Utc::now();
        let id = Uuid::new_v4();
        let new_row = NewDocumentRow {
            id,
            content,
            collection_id: *collection_id.as_uuid(),
            created_at: now,
            updated_at: now,
        };

        diesel::insert_into(documents::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(|error| map_insert_error(error, *collection_id))?;

        Ok(Document::new(
            DocumentId::from_uuid(id),
            content.clone(),
            *collection_id,
            now,
            now,
        ))
    }

    async fn update(
        &self,
        document: &Document,
    ) -> Result<Option<Document>, DocumentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let now = Utc::now();
        let changes = DocumentUpdate {
            content: document.content(),
            updated_at: now,
        };

        let updated_rows = diesel::update(documents::table)
            .filter(documents::id.eq(*document.id().as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated_rows == 0 {
            return Ok(None);
        }
        Ok(Some(document.clone().with_updated_at(now)))
    }

    async fn delete(&self, id: &DocumentId) -> Result<bool, DocumentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted_rows = diesel::delete(documents::table)
            .filter(documents::id.eq(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted_rows > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let pool_err = PoolError::build("invalid URL");
        let repo_err = map_pool_error(pool_err);

        assert!(matches!(
            repo_err,
            DocumentRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn foreign_key_violation_maps_to_missing_collection() {
        let collection_id = CollectionId::random();
        let diesel_err = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ForeignKeyViolation,
            Box::new("violates foreign key constraint".to_owned()),
        );
        let repo_err = map_insert_error(diesel_err, collection_id);

        assert!(matches!(
            repo_err,
            DocumentRepositoryError::MissingCollection { .. }
        ));
        assert!(repo_err.to_string().contains(&collection_id.to_string()));
    }

    #[rstest]
    fn row_to_document_preserves_content() {
        let now = Utc::now();
        let parent = Uuid::new_v4();
        let row = DocumentRow {
            id: Uuid::new_v4(),
            content: json!({"title": "Soup"}),
            collection_id: parent,
            created_at: now,
            updated_at: now,
        };

        let document = row_to_document(row);
        assert_eq!(document.content(), &json!({"title": "Soup"}));
        assert_eq!(document.parent_collection_id().as_uuid(), &parent);
    }
}
