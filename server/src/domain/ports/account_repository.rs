//! Port for account persistence.
//!
//! The [`AccountRepository`] trait defines the contract for storing and
//! retrieving account records. Adapters generate identifiers and timestamps
//! on insert and refresh the update timestamp on every successful update.

use async_trait::async_trait;

use crate::domain::{Account, AccountId, Handle};

use super::define_repository_error;

define_repository_error! {
    /// Errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "account repository query failed: {message}",
        /// The unique handle constraint rejected the write.
        DuplicateHandle { handle: String } =>
            "handle already in use: {handle}",
    }
}

/// Port for account storage and retrieval.
///
/// Lookups are by identifier only; accounts sit at the root of the ownership
/// chain and carry no scoping column of their own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Return every stored account in storage-native order.
    async fn list(&self) -> Result<Vec<Account>, AccountRepositoryError>;

    /// Fetch an account by identifier.
    ///
    /// Returns `None` when no account with that identifier exists.
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountRepositoryError>;

    /// Insert a new account with a generated identifier and timestamps.
    ///
    /// Fails with [`AccountRepositoryError::DuplicateHandle`] when the handle
    /// is already claimed.
    async fn insert(&self, handle: &Handle) -> Result<Account, AccountRepositoryError>;

    /// Persist a merged account record, refreshing its update timestamp.
    ///
    /// Returns `None` when the row no longer exists. Fails with
    /// [`AccountRepositoryError::DuplicateHandle`] when the new handle is
    /// already claimed by another account.
    async fn update(&self, account: &Account) -> Result<Option<Account>, AccountRepositoryError>;

    /// Delete an account, cascading to its collections and their documents.
    ///
    /// Returns `false` when the row no longer exists.
    async fn delete(&self, id: &AccountId) -> Result<bool, AccountRepositoryError>;
}
