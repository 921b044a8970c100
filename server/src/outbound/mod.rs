//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern, providing concrete
//! implementations of the domain repository ports:
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: `DashMap`-backed store for tests and pool-less operation
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod memory;
pub mod persistence;

pub use memory::MemoryStore;
