//! Account domain service.
//!
//! Implements the account driving ports. Accounts are the root of the
//! ownership chain, so operations here validate only the account's own
//! identifier; there is no ancestor to resolve.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::identifier;
use crate::domain::ports::{
    AccountPatch, AccountRepository, AccountRepositoryError, AccountsCommand, AccountsQuery,
};
use crate::domain::{Account, AccountId, Error, Handle};

/// Account service implementing the driving ports.
#[derive(Clone)]
pub struct AccountService<R> {
    repo: Arc<R>,
}

impl<R> AccountService<R> {
    /// Create a new service over the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> AccountService<R>
where
    R: AccountRepository,
{
    fn map_repository_error(error: AccountRepositoryError) -> Error {
        match error {
            AccountRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("account repository unavailable: {message}"))
            }
            AccountRepositoryError::Query { message } => {
                Error::internal(format!("account repository error: {message}"))
            }
            AccountRepositoryError::DuplicateHandle { handle } => {
                Error::conflict("handle already in use").with_details(json!({
                    "field": "handle",
                    "value": handle,
                    "code": "duplicate_handle",
                }))
            }
        }
    }

    async fn fetch(&self, id: &AccountId) -> Result<Account, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found("account not found"))
    }
}

#[async_trait]
impl<R> AccountsQuery for AccountService<R>
where
    R: AccountRepository,
{
    async fn list(&self) -> Result<Vec<Account>, Error> {
        self.repo.list().await.map_err(Self::map_repository_error)
    }

    async fn get(&self, account_id: &str) -> Result<Account, Error> {
        let id = AccountId::from_uuid(identifier::parse_id(account_id, "accountId")?);
        self.fetch(&id).await
    }
}

#[async_trait]
impl<R> AccountsCommand for AccountService<R>
where
    R: AccountRepository,
{
    async fn create(&self, handle: Handle) -> Result<Account, Error> {
        self.repo
            .insert(&handle)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn update<'a>(
        &self,
        account_id: Option<&'a str>,
        patch: AccountPatch,
    ) -> Result<Account, Error> {
        let account_id = identifier::require_id(account_id, "accountId")?;
        let existing = self.get(account_id).await?;
        let merged = match patch.handle {
            Some(handle) => existing.with_handle(handle),
            None => existing,
        };
        self.repo
            .update(&merged)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found("account not found"))
    }

    async fn remove<'a>(&self, account_id: Option<&'a str>) -> Result<Account, Error> {
        let account_id = identifier::require_id(account_id, "accountId")?;
        let existing = self.get(account_id).await?;
        let deleted = self
            .repo
            .delete(&existing.id())
            .await
            .map_err(Self::map_repository_error)?;
        if !deleted {
            return Err(Error::not_found("account not found"));
        }
        Ok(existing)
    }
}
