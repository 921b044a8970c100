//! Document entity.
//!
//! A document belongs to exactly one collection and carries an opaque JSON
//! content blob. No schema is imposed on the content; merge updates replace
//! the blob wholesale when one is supplied.

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::CollectionId;

/// Unique identifier for a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(Uuid);

impl DocumentId {
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

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Document record as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    id: DocumentId,
    content: Value,
    parent_collection_id: CollectionId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Document {
    /// Assemble a document from stored parts.
    #[must_use]
    pub fn new(
        id: DocumentId,
        content: Value,
        parent_collection_id: CollectionId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            content,
            parent_collection_id,
            created_at,
            updated_at,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Opaque content blob.
    #[must_use]
    pub fn content(&self) -> &Value {
        &self.content
    }

    /// Parent collection, immutable after creation.
    #[must_use]
    pub fn parent_collection_id(&self) -> CollectionId {
        self.parent_collection_id
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

    /// Return a copy with the content replaced.
    #[must_use]
    pub fn with_content(mut self, content: Value) -> Self {
        self.content = content;
        self
    }

    /// Return a copy with the update timestamp replaced.
    #[must_use]
    pub(crate) fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }
}
