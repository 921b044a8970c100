//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_repository_error;

mod account_repository;
mod accounts_command;
mod accounts_query;
mod collection_repository;
mod collections_command;
mod collections_query;
mod document_repository;
mod documents_command;
mod documents_query;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError};
#[cfg(test)]
pub use accounts_command::MockAccountsCommand;
pub use accounts_command::{AccountPatch, AccountsCommand};
#[cfg(test)]
pub use accounts_query::MockAccountsQuery;
pub use accounts_query::AccountsQuery;
#[cfg(test)]
pub use collection_repository::MockCollectionRepository;
pub use collection_repository::{CollectionRepository, CollectionRepositoryError};
#[cfg(test)]
pub use collections_command::MockCollectionsCommand;
pub use collections_command::{CollectionPatch, CollectionsCommand};
#[cfg(test)]
pub use collections_query::MockCollectionsQuery;
pub use collections_query::CollectionsQuery;
#[cfg(test)]
pub use document_repository::MockDocumentRepository;
pub use document_repository::{DocumentRepository, DocumentRepositoryError};
#[cfg(test)]
pub use documents_command::MockDocumentsCommand;
pub use documents_command::{DocumentPatch, DocumentsCommand};
#[cfg(test)]
pub use documents_query::MockDocumentsQuery;
pub use documents_query::DocumentsQuery;
