//! Collection entity.
//!
//! A collection belongs to exactly one account. The owning edge is set when
//! the collection is created from a resolved path and never changes
//! afterwards; merge updates may only touch the name.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::AccountId;

/// Unique identifier for a [`Collection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectionId(Uuid);

impl CollectionId {
    /// Construct an identifier from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for CollectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CollectionId> for String {
    fn from(value: CollectionId) -> Self {
        value.to_string()
    }
}

/// Collection record as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    id: CollectionId,
    name: String,
    owner_account_id: AccountId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Collection {
    /// Assemble a collection from stored parts.
    #[must_use]
    pub fn new(
        id: CollectionId,
        name: impl Into<String>,
        owner_account_id: AccountId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            owner_account_id,
            created_at,
            updated_at,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> CollectionId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Owning account, immutable after creation.
    #[must_use]
    pub fn owner_account_id(&self) -> AccountId {
        self.owner_account_id
    }

    /// Creation timestamp, immutable after creation.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Timestamp of the most recent successful update.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Return a copy with the name replaced.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Return a copy with the update timestamp replaced.
    #[must_use]
    pub(crate) fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;

    #[test]
    fn with_name_preserves_ownership() {
        let owner = AccountId::random();
        let created = Utc::now();
        let collection = Collection::new(CollectionId::random(), "before", owner, created, created);
        let id = collection.id();

        let renamed = collection.with_name("after");
        assert_eq!(renamed.id(), id);
        assert_eq!(renamed.name(), "after");
        assert_eq!(renamed.owner_account_id(), owner);
        assert_eq!(renamed.created_at(), created);
    }

    #[test]
    fn collection_id_display_matches_uuid() {
        let uuid = Uuid::new_v4();
        assert_eq!(CollectionId::from_uuid(uuid).to_string(), uuid.to_string());
    }
}
