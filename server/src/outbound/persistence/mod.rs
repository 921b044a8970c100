//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via Diesel with async support through `diesel-async` and `bb8`
//! connection pooling.
//!
//! The adapters are thin translators: Diesel row structs (`models.rs`) and
//! the schema definitions (`schema.rs`) stay internal to this module, and all
//! database errors are mapped to the repository error types the domain
//! understands.

mod diesel_account_repository;
mod diesel_collection_repository;
mod diesel_document_repository;
pub(crate) mod diesel_error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_collection_repository::DieselCollectionRepository;
pub use diesel_document_repository::DieselDocumentRepository;
pub use migrations::apply_migrations;
pub use pool::{DbPool, PoolConfig, PoolError};
