//! Builders for the HTTP state ports backed by the configured storage.

use std::sync::Arc;

use actix_web::web;

use folio_server::domain::ports::{
    AccountRepository, AccountsQuery, CollectionRepository, CollectionsQuery, DocumentRepository,
};
use folio_server::domain::{AccountService, CollectionService, DocumentService};
use folio_server::inbound::http::state::HttpState;
use folio_server::outbound::MemoryStore;
use folio_server::outbound::persistence::{
    DieselAccountRepository, DieselCollectionRepository, DieselDocumentRepository,
};

use super::ServerConfig;

/// Chain the three resource services over their repositories and expose
/// them as the port bundle handlers consume.
///
/// The account service doubles as the owner resolver for the collection
/// service, which in turn resolves parents for the document service, so the
/// ownership chain is validated top-down on every nested operation.
fn build_ports<A, C, D>(
    account_repo: Arc<A>,
    collection_repo: Arc<C>,
    document_repo: Arc<D>,
) -> HttpState
where
    A: AccountRepository + 'static,
    C: CollectionRepository + 'static,
    D: DocumentRepository + 'static,
{
    let accounts = Arc::new(AccountService::new(account_repo));
    let collections = Arc::new(CollectionService::new(
        accounts.clone() as Arc<dyn AccountsQuery>,
        collection_repo,
    ));
    let documents = Arc::new(DocumentService::new(
        collections.clone() as Arc<dyn CollectionsQuery>,
        document_repo,
    ));

    HttpState {
        accounts: accounts.clone(),
        accounts_query: accounts,
        collections: collections.clone(),
        collections_query: collections,
        documents: documents.clone(),
        documents_query: documents,
    }
}

/// Build the shared HTTP state from the configured storage backend.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => build_ports(
            Arc::new(DieselAccountRepository::new(pool.clone())),
            Arc::new(DieselCollectionRepository::new(pool.clone())),
            Arc::new(DieselDocumentRepository::new(pool.clone())),
        ),
        None => {
            let store = MemoryStore::new_shared();
            build_ports(store.clone(), store.clone(), store)
        }
    };

    web::Data::new(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_state() -> HttpState {
        let store = MemoryStore::new_shared();
        build_ports(store.clone(), store.clone(), store)
    }

    #[tokio::test]
    async fn memory_backed_ports_share_one_store() {
        let state = memory_state();

        let handle = folio_server::domain::Handle::new("ada").expect("valid handle");
        let account = state.accounts.create(handle).await.expect("create succeeds");

        let listed = state.accounts_query.list().await.expect("list succeeds");
        assert_eq!(listed, vec![account]);
    }

    #[tokio::test]
    async fn nested_services_resolve_through_the_account_chain() {
        let state = memory_state();

        let handle = folio_server::domain::Handle::new("ada").expect("valid handle");
        let account = state.accounts.create(handle).await.expect("create succeeds");
        let account_id = account.id().to_string();

        let collection = state
            .collections
            .create(&account_id, "field notes".to_owned())
            .await
            .expect("collection create succeeds");
        assert_eq!(collection.owner_account_id(), account.id());

        let absent_owner = "00000000-0000-0000-0000-000000000000";
        let err = state
            .collections
            .create(absent_owner, "orphan".to_owned())
            .await
            .expect_err("unknown owner is rejected");
        assert_eq!(err.message(), "account not found");
    }
}
