//! Collection domain service.
//!
//! Implements the collection driving ports. Every operation first resolves
//! the owning account through [`AccountsQuery`], so a missing or malformed
//! account fails the request before any collection state is touched. Lookups
//! are scoped to the resolved owner, which makes another owner's collections
//! indistinguishable from absent ones.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::identifier;
use crate::domain::ports::{
    AccountsQuery, CollectionPatch, CollectionRepository, CollectionRepositoryError,
    CollectionsCommand, CollectionsQuery,
};
use crate::domain::{AccountId, Collection, CollectionId, Error};

/// Collection service implementing the driving ports.
#[derive(Clone)]
pub struct CollectionService<R> {
    accounts: Arc<dyn AccountsQuery>,
    repo: Arc<R>,
}

impl<R> CollectionService<R> {
    /// Create a new service over the given account resolver and repository.
    pub fn new(accounts: Arc<dyn AccountsQuery>, repo: Arc<R>) -> Self {
        Self { accounts, repo }
    }
}

impl<R> CollectionService<R>
where
    R: CollectionRepository,
{
    fn map_repository_error(error: CollectionRepositoryError) -> Error {
        match error {
            CollectionRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("collection repository unavailable: {message}"))
            }
            CollectionRepositoryError::Query { message } => {
                Error::internal(format!("collection repository error: {message}"))
            }
            CollectionRepositoryError::MissingOwner { .. } => Error::not_found("account not found"),
        }
    }

    /// Confirm the owning account exists before touching collection state.
    async fn resolve_owner(&self, account_id: &str) -> Result<AccountId, Error> {
        let account = self.accounts.get(account_id).await?;
        Ok(account.id())
    }
}

#[async_trait]
impl<R> CollectionsQuery for CollectionService<R>
where
    R: CollectionRepository,
{
    async fn list(&self, account_id: &str) -> Result<Vec<Collection>, Error> {
        let owner = self.resolve_owner(account_id).await?;
        self.repo
            .list_for_owner(&owner)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn get(&self, account_id: &str, collection_id: &str) -> Result<Collection, Error> {
        let owner = self.resolve_owner(account_id).await?;
        let id = CollectionId::from_uuid(identifier::parse_id(collection_id, "collectionId")?);
        self.repo
            .find_for_owner(&id, &owner)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found("collection not found"))
    }
}

#[async_trait]
impl<R> CollectionsCommand for CollectionService<R>
where
    R: CollectionRepository,
{
    async fn create(&self, account_id: &str, name: String) -> Result<Collection, Error> {
        let owner = self.resolve_owner(account_id).await?;
        self.repo
            .insert(&owner, &name)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn update<'a>(
        &self,
        account_id: &str,
        collection_id: Option<&'a str>,
        patch: CollectionPatch,
    ) -> Result<Collection, Error> {
        self.resolve_owner(account_id).await?;
        let collection_id = identifier::require_id(collection_id, "collectionId")?;
        let existing = self.get(account_id, collection_id).await?;
        let merged = match patch.name {
            Some(name) => existing.with_name(name),
            None => existing,
        };
        self.repo
            .update(&merged)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found("collection not found"))
    }

    async fn remove<'a>(
        &self,
        account_id: &str,
        collection_id: Option<&'a str>,
    ) -> Result<Collection, Error> {
        self.resolve_owner(account_id).await?;
        let collection_id = identifier::require_id(collection_id, "collectionId")?;
        let existing = self.get(account_id, collection_id).await?;
        let deleted = self
            .repo
            .delete(&existing.id())
            .await
            .map_err(Self::map_repository_error)?;
        if !deleted {
            return Err(Error::not_found("collection not found"));
        }
        Ok(existing)
    }
}
