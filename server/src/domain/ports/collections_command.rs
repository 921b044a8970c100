//! Driving port for collection mutations.

use async_trait::async_trait;

use crate::domain::{Collection, Error};

/// Fields a caller may change on an existing collection.
///
/// Merge semantics: `None` leaves the stored value untouched. The owning
/// account can never be patched.
#[derive(Debug, Clone, Default)]
pub struct CollectionPatch {
    /// Replacement name.
    pub name: Option<String>,
}

/// Domain use-case port for mutating collections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionsCommand: Send + Sync {
    /// Create a collection under the account.
    ///
    /// The owner edge is stamped from the resolved path, never from the
    /// payload.
    async fn create(&self, account_id: &str, name: String) -> Result<Collection, Error>;

    /// Merge the patch over the stored collection and persist the result.
    ///
    /// `collection_id` is `None` when the route carried no target
    /// identifier; the operation then fails with an invalid-request error.
    async fn update<'a>(
        &self,
        account_id: &str,
        collection_id: Option<&'a str>,
        patch: CollectionPatch,
    ) -> Result<Collection, Error>;

    /// Delete a collection and return the pre-deletion record.
    ///
    /// Cascades to the documents it contains.
    async fn remove<'a>(
        &self,
        account_id: &str,
        collection_id: Option<&'a str>,
    ) -> Result<Collection, Error>;
}
