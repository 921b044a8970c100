//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountsCommand, AccountsQuery, CollectionsCommand, CollectionsQuery, DocumentsCommand,
    DocumentsQuery,
};

/// Dependency bundle for HTTP handlers.
///
/// One command and one query port per resource level. Handlers never see the
/// concrete service or repository types behind these trait objects.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountsCommand>,
    pub accounts_query: Arc<dyn AccountsQuery>,
    pub collections: Arc<dyn CollectionsCommand>,
    pub collections_query: Arc<dyn CollectionsQuery>,
    pub documents: Arc<dyn DocumentsCommand>,
    pub documents_query: Arc<dyn DocumentsQuery>,
}
