//! Driving port for collection reads.
//!
//! Every operation takes the raw account identifier from the path and
//! resolves the ownership chain before any collection data is returned.
//! [`CollectionsQuery::get`] doubles as the parent resolver for the document
//! layer.

use async_trait::async_trait;

use crate::domain::{Collection, Error};

/// Domain use-case port for reading collections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionsQuery: Send + Sync {
    /// Return all collections owned by the account.
    async fn list(&self, account_id: &str) -> Result<Vec<Collection>, Error>;

    /// Resolve a collection scoped to its owner.
    ///
    /// A collection that exists under a different owner resolves exactly
    /// like an absent one: not found.
    async fn get(&self, account_id: &str, collection_id: &str) -> Result<Collection, Error>;
}
