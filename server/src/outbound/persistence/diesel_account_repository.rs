//! PostgreSQL-backed account repository using Diesel ORM.
//!
//! Thin adapter translating between Diesel rows and domain accounts. Handle
//! uniqueness is enforced by the database; unique violations surface as
//! [`AccountRepositoryError::DuplicateHandle`] so the domain can report the
//! conflict without inspecting SQLSTATE details.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{Account, AccountId, Handle};

use super::diesel_error_mapping::{
    ConstraintViolation, QueryFailure, classify_diesel_error, constraint_violation,
    pool_error_message,
};
use super::models::{AccountRow, AccountUpdate, NewAccountRow};
use super::pool::{DbPool, PoolError};
use super::schema::accounts;

/// Diesel-backed implementation of the account repository port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain account repository errors.
fn map_pool_error(error: PoolError) -> AccountRepositoryError {
    AccountRepositoryError::connection(pool_error_message(error))
}

/// Map Diesel errors to domain account repository errors.
fn map_diesel_error(error: diesel::result::Error) -> AccountRepositoryError {
    match classify_diesel_error(&error) {
        QueryFailure::Query(message) => AccountRepositoryError::query(message),
        QueryFailure::Connection(message) => AccountRepositoryError::connection(message),
    }
}

/// Map write errors, intercepting unique violations on the handle index.
fn map_write_error(error: diesel::result::Error, handle: &str) -> AccountRepositoryError {
    match constraint_violation(&error) {
        Some(ConstraintViolation::Unique) => AccountRepositoryError::duplicate_handle(handle),
        _ => map_diesel_error(error),
    }
}

/// Convert a database row to a domain account.
fn row_to_account(row: AccountRow) -> Result<Account, AccountRepositoryError> {
    let handle = Handle::new(row.handle)
        .map_err(|err| AccountRepositoryError::query(format!("stored handle invalid: {err}")))?;
    Ok(Account::new(
        AccountId::from_uuid(row.id),
        handle,
        row.created_at,
        row.updated_at,
    ))
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn list(&self) -> Result<Vec<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<AccountRow> = accounts::table
            .order(accounts::created_at.asc())
            .select(AccountRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_account).collect()
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<AccountRow> = accounts::table
            .filter(accounts::id.eq(*id.as_uuid()))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_account).transpose()
    }

    async fn insert(&self, handle: &Handle) -> Result<Account, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let now = Utc::now();
        let id = Uuid::new_v4();
        let new_row = NewAccountRow {
            id,
            handle: handle.as_ref(),
            created_at: now,
            updated_at: now,
        };

        diesel::insert_into(accounts::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(|error| map_write_error(error, handle.as_ref()))?;

        Ok(Account::new(
            AccountId::from_uuid(id),
            handle.clone(),
            now,
            now,
        ))
    }

    async fn update(&self, account: &Account) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let now = Utc::now();
        let changes = AccountUpdate {
            handle: account.handle().as_ref(),
            updated_at: now,
        };

        let updated_rows = diesel::update(accounts::table)
            .filter(accounts::id.eq(*account.id().as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|error| map_write_error(error, account.handle().as_ref()))?;

        if updated_rows == 0 {
            return Ok(None);
        }
        Ok(Some(account.clone().with_updated_at(now)))
    }

    async fn delete(&self, id: &AccountId) -> Result<bool, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted_rows = diesel::delete(accounts::table)
            .filter(accounts::id.eq(*id.as_uuid()))
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

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let pool_err = PoolError::checkout("connection refused");
        let repo_err = map_pool_error(pool_err);

        assert!(matches!(repo_err, AccountRepositoryError::Connection { .. }));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let diesel_err = diesel::result::Error::NotFound;
        let repo_err = map_diesel_error(diesel_err);

        assert!(matches!(repo_err, AccountRepositoryError::Query { .. }));
        assert!(repo_err.to_string().contains("record not found"));
    }

    #[rstest]
    fn unique_violation_maps_to_duplicate_handle() {
        let diesel_err = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_owned()),
        );
        let repo_err = map_write_error(diesel_err, "ada");

        assert!(matches!(
            repo_err,
            AccountRepositoryError::DuplicateHandle { .. }
        ));
        assert!(repo_err.to_string().contains("ada"));
    }

    #[rstest]
    fn row_to_account_preserves_fields() {
        let now = Utc::now();
        let row = AccountRow {
            id: Uuid::new_v4(),
            handle: "ada".to_owned(),
            created_at: now,
            updated_at: now,
        };

        let account = row_to_account(row).expect("valid row");
        assert_eq!(account.handle().as_ref(), "ada");
        assert_eq!(account.created_at(), now);
    }

    #[rstest]
    fn row_to_account_rejects_blank_handle() {
        let now = Utc::now();
        let row = AccountRow {
            id: Uuid::new_v4(),
            handle: "   ".to_owned(),
            created_at: now,
            updated_at: now,
        };

        let error = row_to_account(row).expect_err("blank handle");
        assert!(matches!(error, AccountRepositoryError::Query { .. }));
    }
}
