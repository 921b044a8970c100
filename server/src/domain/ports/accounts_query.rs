//! Driving port for account reads.
//!
//! Inbound adapters use this port to fetch accounts without importing
//! outbound persistence concerns. It is also the leaf dependency of the
//! collection resolver: every nested operation confirms the owning account
//! through [`AccountsQuery::get`] before touching its own storage.

use async_trait::async_trait;

use crate::domain::{Account, Error};

/// Domain use-case port for reading accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountsQuery: Send + Sync {
    /// Return every account.
    async fn list(&self) -> Result<Vec<Account>, Error>;

    /// Resolve an account by its raw path identifier.
    ///
    /// Fails with an invalid-request error when the identifier is not a
    /// canonical UUID and a not-found error when no such account exists.
    async fn get(&self, account_id: &str) -> Result<Account, Error>;
}
