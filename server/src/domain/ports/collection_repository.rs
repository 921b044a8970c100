//! Port for collection persistence.
//!
//! Reads are scoped: a lookup filters by the collection identifier and the
//! owning account in a single query, so a collection under a different owner
//! is indistinguishable from an absent one. The scoped query is the
//! authorization boundary.

use async_trait::async_trait;

use crate::domain::{AccountId, Collection, CollectionId};

use super::define_repository_error;

define_repository_error! {
    /// Errors raised by collection repository adapters.
    pub enum CollectionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "collection repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "collection repository query failed: {message}",
        /// The owning account vanished between resolution and insert.
        MissingOwner { account_id: String } =>
            "owning account no longer exists: {account_id}",
    }
}

/// Port for collection storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionRepository: Send + Sync {
    /// Return all collections owned by the account, in storage-native order.
    async fn list_for_owner(
        &self,
        owner: &AccountId,
    ) -> Result<Vec<Collection>, CollectionRepositoryError>;

    /// Fetch a collection by identifier and owner in one scoped query.
    ///
    /// Returns `None` both when the identifier is absent and when the row
    /// exists under a different owner.
    async fn find_for_owner(
        &self,
        id: &CollectionId,
        owner: &AccountId,
    ) -> Result<Option<Collection>, CollectionRepositoryError>;

    /// Insert a new collection under the owner with generated identifier and
    /// timestamps.
    ///
    /// Fails with [`CollectionRepositoryError::MissingOwner`] when the owner
    /// row was deleted after resolution (foreign key violation).
    async fn insert(
        &self,
        owner: &AccountId,
        name: &str,
    ) -> Result<Collection, CollectionRepositoryError>;

    /// Persist a merged collection record, refreshing its update timestamp.
    ///
    /// Returns `None` when the row no longer exists.
    async fn update(
        &self,
        collection: &Collection,
    ) -> Result<Option<Collection>, CollectionRepositoryError>;

    /// Delete a collection, cascading to its documents.
    ///
    /// Returns `false` when the row no longer exists.
    async fn delete(&self, id: &CollectionId) -> Result<bool, CollectionRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        CollectionRepositoryError::connection("refused"),
        "collection repository connection failed: refused"
    )]
    #[case(
        CollectionRepositoryError::missing_owner("7e3f"),
        "owning account no longer exists: 7e3f"
    )]
    fn errors_format_their_context(
        #[case] error: CollectionRepositoryError,
        #[case] expected: &str,
    ) {
        assert_eq!(error.to_string(), expected);
    }
}
