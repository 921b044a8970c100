//! Domain model and services.
//!
//! Purpose: define the owned-resource hierarchy (accounts own collections,
//! collections own documents), the ports it is expressed through, and the
//! services that resolve identifiers strictly within their owning scope.
//! Keep types immutable and document invariants and serialisation contracts
//! (serde) in each type's Rustdoc.

mod account;
mod account_service;
mod collection;
mod collection_service;
mod document;
mod document_service;
pub mod error;
pub(crate) mod identifier;
pub mod ports;
mod trace_id;

pub use self::account::{Account, AccountId, Handle, HandleValidationError};
pub use self::account_service::AccountService;
pub use self::collection::{Collection, CollectionId};
pub use self::collection_service::CollectionService;
pub use self::document::{Document, DocumentId};
pub use self::document_service::DocumentService;
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;
