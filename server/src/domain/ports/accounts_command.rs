//! Driving port for account mutations.

use async_trait::async_trait;

use crate::domain::{Account, Error, Handle};

/// Fields a caller may change on an existing account.
///
/// Merge semantics: `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    /// Replacement handle, subject to the unique constraint.
    pub handle: Option<Handle>,
}

/// Domain use-case port for mutating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountsCommand: Send + Sync {
    /// Create an account claiming the given handle.
    ///
    /// Fails with a conflict error when the handle is already in use.
    async fn create(&self, handle: Handle) -> Result<Account, Error>;

    /// Merge the patch over the stored account and persist the result.
    ///
    /// `account_id` is `None` when the route carried no target identifier;
    /// the operation then fails with an invalid-request error.
    async fn update<'a>(
        &self,
        account_id: Option<&'a str>,
        patch: AccountPatch,
    ) -> Result<Account, Error>;

    /// Delete an account and return the pre-deletion record.
    ///
    /// Cascades to owned collections and their documents.
    async fn remove<'a>(&self, account_id: Option<&'a str>) -> Result<Account, Error>;
}
