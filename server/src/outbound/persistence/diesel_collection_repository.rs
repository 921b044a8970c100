//! PostgreSQL-backed collection repository using Diesel ORM.
//!
//! Thin adapter translating between Diesel rows and domain collections.
//! Lookups are always scoped to the owning account, so a collection owned by
//! another account is indistinguishable from an absent row. The foreign key
//! to accounts guards insert races against concurrent account deletion.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{CollectionRepository, CollectionRepositoryError};
use crate::domain::{AccountId, Collection, CollectionId};

use super::diesel_error_mapping::{
    ConstraintViolation, QueryFailure, classify_diesel_error, constraint_violation,
    pool_error_message,
};
use super::models::{CollectionRow, CollectionUpdate, NewCollectionRow};
use super::pool::{DbPool, PoolError};
use super::schema::collections;

/// Diesel-backed implementation of the collection repository port.
#[derive(Clone)]
pub struct DieselCollectionRepository {
    pool: DbPool,
}

impl DieselCollectionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain collection repository errors.
fn map_pool_error(error: PoolError) -> CollectionRepositoryError {
    CollectionRepositoryError::connection(pool_error_message(error))
}

/// Map Diesel errors to domain collection repository errors.
fn map_diesel_error(error: diesel::result::Error) -> CollectionRepositoryError {
    match classify_diesel_error(&error) {
        QueryFailure::Query(message) => CollectionRepositoryError::query(message),
        QueryFailure::Connection(message) => CollectionRepositoryError::connection(message),
    }
}

/// Map insert errors, intercepting the foreign key to the owning account.
fn map_insert_error(error: diesel::result::Error, owner: AccountId) -> CollectionRepositoryError {
    match constraint_violation(&error) {
        Some(ConstraintViolation::ForeignKey) => CollectionRepositoryError::missing_owner(owner),
        _ => map_diesel_error(error),
    }
}

/// Convert a database row to a domain collection.
fn row_to_collection(row: CollectionRow) -> Collection {
    Collection::new(
        CollectionId::from_uuid(row.id),
        row.name,
        AccountId::from_uuid(row.owner_account_id),
        row.created_at,
        row.updated_at,
    )
}

#[async_trait]
impl CollectionRepository for DieselCollectionRepository {
    async fn list_for_owner(
        &self,
        owner: &AccountId,
    ) -> Result<Vec<Collection>, CollectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CollectionRow> = collections::table
            .filter(collections::owner_account_id.eq(*owner.as_uuid()))
            .order(collections::created_at.asc())
            .select(CollectionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_collection).collect())
    }

    async fn find_for_owner(
        &self,
        id: &CollectionId,
        owner: &AccountId,
    ) -> Result<Option<Collection>, CollectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CollectionRow> = collections::table
            .filter(
                collections::id
                    .eq(*id.as_uuid())
                    .and(collections::owner_account_id.eq(*owner.as_uuid())),
            )
            .select(CollectionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_collection))
    }

    async fn insert(
        &self,
        owner: &AccountId,
        name: &str,
    ) -> Result<Collection, CollectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let now = Utc::now();
        let id = Uuid::new_v4();
        let new_row = NewCollectionRow {
            id,
            name,
            owner_account_id: *owner.as_uuid(),
            created_at: now,
            updated_at: now,
        };

        diesel::insert_into(collections::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(|error| map_insert_error(error, *owner))?;

        Ok(Collection::new(
            CollectionId::from_uuid(id),
            name,
            *owner,
            now,
            now,
        ))
    }

    async fn update(
        &self,
        collection: &Collection,
    ) -> Result<Option<Collection>, CollectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let now = Utc::now();
        let changes = CollectionUpdate {
            name: collection.name(),
            updated_at: now,
        };

        let updated_rows = diesel::update(collections::table)
            .filter(collections::id.eq(*collection.id().as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated_rows == 0 {
            return Ok(None);
        }
        Ok(Some(collection.clone().with_updated_at(now)))
    }

    async fn delete(&self, id: &CollectionId) -> Result<bool, CollectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted_rows = diesel::delete(collections::table)
            .filter(collections::id.eq(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted_rows > 0)
    }
}
