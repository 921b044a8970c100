//! In-memory persistence fallback.
//!
//! Backs the full repository surface with `DashMap` so the server can run
//! without a database, for tests and local development. Behaviour mirrors the
//! SQL adapters: scoped lookups filter on the stored parent reference, handle
//! uniqueness is enforced on insert and update, and deleting a parent removes
//! its descendants.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::Value;

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, CollectionRepository, CollectionRepositoryError,
    DocumentRepository, DocumentRepositoryError,
};
use crate::domain::{Account, AccountId, Collection, CollectionId, Document, DocumentId, Handle};

/// Thread-safe in-memory store implementing every repository port.
///
/// Uses `DashMap` for lock-free concurrent access. The handle index is a
/// secondary map manipulated through the atomic entry API so two concurrent
/// inserts cannot claim the same handle.
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: DashMap<AccountId, Account>,
    /// Handle uniqueness index mapping each handle to its owning account.
    handles: DashMap<String, AccountId>,
    collections: DashMap<CollectionId, Collection>,
    documents: DashMap<DocumentId, Document>,
}

impl MemoryStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty store wrapped in `Arc`.
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    fn claim_handle(&self, handle: &str, id: AccountId) -> Result<(), AccountRepositoryError> {
        match self.handles.entry(handle.to_owned()) {
            Entry::Occupied(occupied) if *occupied.get() != id => {
                Err(AccountRepositoryError::duplicate_handle(handle))
            }
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(vacant) => {
                vacant.insert(id);
                Ok(())
            }
        }
    }

    fn remove_collection_documents(&self, collection_id: CollectionId) {
        self.documents
            .retain(|_, document| document.parent_collection_id() != collection_id);
    }
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Account>, AccountRepositoryError> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        accounts.sort_by_key(Account::created_at);
        Ok(accounts)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountRepositoryError> {
        Ok(self.accounts.get(id).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, handle: &Handle) -> Result<Account, AccountRepositoryError> {
        let now = Utc::now();
        let account = Account::new(AccountId::random(), handle.clone(), now, now);
        self.claim_handle(handle.as_ref(), account.id())?;
        self.accounts.insert(account.id(), account.clone());
        Ok(account)
    }

    async fn update(&self, account: &Account) -> Result<Option<Account>, AccountRepositoryError> {
        let Some(previous_handle) = self
            .accounts
            .get(&account.id())
            .map(|entry| entry.handle().clone())
        else {
            return Ok(None);
        };
        if previous_handle != *account.handle() {
            self.claim_handle(account.handle().as_ref(), account.id())?;
            self.handles.remove(previous_handle.as_ref());
        }
        match self.accounts.get_mut(&account.id()) {
            Some(mut entry) => {
                *entry = account.clone().with_updated_at(Utc::now());
                Ok(Some(entry.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &AccountId) -> Result<bool, AccountRepositoryError> {
        let Some((_, account)) = self.accounts.remove(id) else {
            return Ok(false);
        };
        self.handles.remove(account.handle().as_ref());
        let owned: Vec<CollectionId> = self
            .collections
            .iter()
            .filter(|entry| entry.owner_account_id() == *id)
            .map(|entry| entry.id())
            .collect();
        for collection_id in owned {
            self.collections.remove(&collection_id);
            self.remove_collection_documents(collection_id);
        }
        Ok(true)
    }
}

#[async_trait]
impl CollectionRepository for MemoryStore {
    async fn list_for_owner(
        &self,
        owner: &AccountId,
    ) -> Result<Vec<Collection>, CollectionRepositoryError> {
        let mut collections: Vec<Collection> = self
            .collections
            .iter()
            .filter(|entry| entry.owner_account_id() == *owner)
            .map(|entry| entry.value().clone())
            .collect();
        collections.sort_by_key(Collection::created_at);
        Ok(collections)
    }

    async fn find_for_owner(
        &self,
        id: &CollectionId,
        owner: &AccountId,
    ) -> Result<Option<Collection>, CollectionRepositoryError> {
        let found = self
            .collections
            .get(id)
            .map(|entry| entry.value().clone())
            .filter(|collection| collection.owner_account_id() == *owner);
        Ok(found)
    }

    async fn insert(
        &self,
        owner: &AccountId,
        name: &str,
    ) -> Result<Collection, CollectionRepositoryError> {
        if !self.accounts.contains_key(owner) {
            return Err(CollectionRepositoryError::missing_owner(*owner));
        }
        let now = Utc::now();
        let collection = Collection::new(CollectionId::random(), name, *owner, now, now);
        self.collections.insert(collection.id(), collection.clone());
        Ok(collection)
    }

    async fn update(
        &self,
        collection: &Collection,
    ) -> Result<Option<Collection>, CollectionRepositoryError> {
        match self.collections.get_mut(&collection.id()) {
            Some(mut entry) => {
                *entry = collection.clone().with_updated_at(Utc::now());
                Ok(Some(entry.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &CollectionId) -> Result<bool, CollectionRepositoryError> {
        if self.collections.remove(id).is_none() {
            return Ok(false);
        }
        self.remove_collection_documents(*id);
        Ok(true)
    }
}

#[async_trait]
impl DocumentRepository for MemoryStore {
    async fn list_in_collection(
        &self,
        collection_id: &CollectionId,
    ) -> Result<Vec<Document>, DocumentRepositoryError> {
        let mut documents: Vec<Document> = self
            .documents
            .iter()
            .filter(|entry| entry.parent_collection_id() == *collection_id)
            .map(|entry| entry.value().clone())
            .collect();
        documents.sort_by_key(Document::created_at);
        Ok(documents)
    }

    async fn find_in_collection(
        &self,
        id: &DocumentId,
        collection_id: &CollectionId,
    ) -> Result<Option<Document>, DocumentRepositoryError> {
        let found = self
            .documents
            .get(id)
            .map(|entry| entry.value().clone())
            .filter(|document| document.parent_collection_id() == *collection_id);
        Ok(found)
    }

    async fn insert(
        &self,
        collection_id: &CollectionId,
        content: &Value,
    ) -> Result<Document, DocumentRepositoryError> {
        if !self.collections.contains_key(collection_id) {
            return Err(DocumentRepositoryError::missing_collection(*collection_id));
        }
        let now = Utc::now();
        let document = Document::new(
            DocumentId::random(),
            content.clone(),
            *collection_id,
            now,
            now,
        );
        self.documents.insert(document.id(), document.clone());
        Ok(document)
    }

    async fn update(
        &self,
        document: &Document,
    ) -> Result<Option<Document>, DocumentRepositoryError> {
        match self.documents.get_mut(&document.id()) {
            Some(mut entry) => {
                *entry = document.clone().with_updated_at(Utc::now());
                Ok(Some(entry.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &DocumentId) -> Result<bool, DocumentRepositoryError> {
        Ok(self.documents.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn handle(value: &str) -> Handle {
        Handle::new(value).expect("valid handle")
    }

    // Several traits share method names, so mutating calls are written in
    // qualified form throughout.
    async fn seeded_chain(store: &MemoryStore) -> (Account, Collection, Document) {
        let account = AccountRepository::insert(store, &handle("ada"))
            .await
            .expect("account");
        let collection = CollectionRepository::insert(store, &account.id(), "recipes")
            .await
            .expect("collection");
        let document =
            DocumentRepository::insert(store, &collection.id(), &json!({"title": "Soup"}))
                .await
                .expect("document");
        (account, collection, document)
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_handle() {
        let store = MemoryStore::new();
        AccountRepository::insert(&store, &handle("ada"))
            .await
            .expect("first insert");

        let error = AccountRepository::insert(&store, &handle("ada"))
            .await
            .expect_err("duplicate handle");
        assert!(matches!(
            error,
            AccountRepositoryError::DuplicateHandle { .. }
        ));
    }

    #[tokio::test]
    async fn update_releases_previous_handle() {
        let store = MemoryStore::new();
        let account = AccountRepository::insert(&store, &handle("ada"))
            .await
            .expect("insert");

        AccountRepository::update(&store, &account.clone().with_handle(handle("countess")))
            .await
            .expect("update")
            .expect("account still present");

        AccountRepository::insert(&store, &handle("ada"))
            .await
            .expect("old handle free again");
    }

    #[tokio::test]
    async fn find_for_owner_masks_other_owners() {
        let store = MemoryStore::new();
        let (_, collection, _) = seeded_chain(&store).await;
        let other = AccountRepository::insert(&store, &handle("grace"))
            .await
            .expect("other account");

        let found = store
            .find_for_owner(&collection.id(), &other.id())
            .await
            .expect("query");
        assert!(found.is_none());

        let found = store
            .find_for_owner(&collection.id(), &collection.owner_account_id())
            .await
            .expect("query");
        assert_eq!(found.map(|c| c.id()), Some(collection.id()));
    }

    #[tokio::test]
    async fn find_in_collection_masks_other_collections() {
        let store = MemoryStore::new();
        let (account, _, document) = seeded_chain(&store).await;
        let other = CollectionRepository::insert(&store, &account.id(), "drafts")
            .await
            .expect("other collection");

        let found = store
            .find_in_collection(&document.id(), &other.id())
            .await
            .expect("query");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn insert_collection_requires_existing_owner() {
        let store = MemoryStore::new();
        let error = CollectionRepository::insert(&store, &AccountId::random(), "recipes")
            .await
            .expect_err("owner absent");
        assert!(matches!(
            error,
            CollectionRepositoryError::MissingOwner { .. }
        ));
    }

    #[tokio::test]
    async fn insert_document_requires_existing_collection() {
        let store = MemoryStore::new();
        let error = DocumentRepository::insert(&store, &CollectionId::random(), &json!({}))
            .await
            .expect_err("collection absent");
        assert!(matches!(
            error,
            DocumentRepositoryError::MissingCollection { .. }
        ));
    }

    #[tokio::test]
    async fn delete_account_cascades_to_descendants() {
        let store = MemoryStore::new();
        let (account, collection, document) = seeded_chain(&store).await;

        let deleted = AccountRepository::delete(&store, &account.id())
            .await
            .expect("delete");
        assert!(deleted);
        assert!(
            store
                .find_for_owner(&collection.id(), &account.id())
                .await
                .expect("query")
                .is_none()
        );
        assert!(
            store
                .find_in_collection(&document.id(), &collection.id())
                .await
                .expect("query")
                .is_none()
        );
    }

    #[tokio::test]
    async fn delete_collection_cascades_to_documents() {
        let store = MemoryStore::new();
        let (_, collection, document) = seeded_chain(&store).await;

        let deleted = CollectionRepository::delete(&store, &collection.id())
            .await
            .expect("delete");
        assert!(deleted);
        assert!(
            store
                .find_in_collection(&document.id(), &collection.id())
                .await
                .expect("query")
                .is_none()
        );
    }

    #[tokio::test]
    async fn update_refreshes_updated_at() {
        let store = MemoryStore::new();
        let (_, _, document) = seeded_chain(&store).await;

        let updated = DocumentRepository::update(
            &store,
            &document.clone().with_content(json!({"title": "Stew"})),
        )
        .await
        .expect("update")
        .expect("document present");
        assert_eq!(updated.content(), &json!({"title": "Stew"}));
        assert!(updated.updated_at() >= document.updated_at());
    }

    #[tokio::test]
    async fn update_missing_row_returns_none() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let stray = Document::new(
            DocumentId::random(),
            json!({}),
            CollectionId::random(),
            now,
            now,
        );

        let updated = DocumentRepository::update(&store, &stray)
            .await
            .expect("update");
        assert!(updated.is_none());
    }
}
