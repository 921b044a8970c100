//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//! When migrations change the schema, regenerate with `diesel print-schema`.

diesel::table! {
    /// Account records at the root of the ownership hierarchy.
    accounts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique human-readable handle.
        handle -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Collections, each owned by exactly one account.
    collections (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name, not unique.
        name -> Varchar,
        /// Owning account; cascades on account deletion.
        owner_account_id -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Documents, each parented by exactly one collection.
    documents (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Free-form JSON payload.
        content -> Jsonb,
        /// Parent collection; cascades on collection deletion.
        collection_id -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(collections -> accounts (owner_account_id));
diesel::joinable!(documents -> collections (collection_id));

diesel::allow_tables_to_appear_in_same_query!(accounts, collections, documents);
