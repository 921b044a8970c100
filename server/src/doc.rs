//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (accounts,
//!   collections, documents, health)
//! - **Schemas**: Domain type wrappers ([`ErrorSchema`], [`ErrorCodeSchema`])
//!   and the request/response payloads declared by the handlers
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::accounts::{AccountPayload, AccountResponse};
use crate::inbound::http::collections::{CollectionPayload, CollectionResponse};
use crate::inbound::http::documents::{DocumentPayload, DocumentResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Folio server API",
        description = "HTTP interface for the account, collection, and document hierarchy.",
        license(name = "ISC")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::accounts::list_accounts,
        crate::inbound::http::accounts::create_account,
        crate::inbound::http::accounts::get_account,
        crate::inbound::http::accounts::update_account,
        crate::inbound::http::accounts::remove_account,
        crate::inbound::http::accounts::update_account_without_id,
        crate::inbound::http::accounts::remove_account_without_id,
        crate::inbound::http::collections::list_collections,
        crate::inbound::http::collections::create_collection,
        crate::inbound::http::collections::get_collection,
        crate::inbound::http::collections::update_collection,
        crate::inbound::http::collections::remove_collection,
        crate::inbound::http::collections::update_collection_without_id,
        crate::inbound::http::collections::remove_collection_without_id,
        crate::inbound::http::documents::list_documents,
        crate::inbound::http::documents::create_document,
        crate::inbound::http::documents::get_document,
        crate::inbound::http::documents::update_document,
        crate::inbound::http::documents::remove_document,
        crate::inbound::http::documents::update_document_without_id,
        crate::inbound::http::documents::remove_document_without_id,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        AccountPayload,
        AccountResponse,
        CollectionPayload,
        CollectionResponse,
        DocumentPayload,
        DocumentResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "accounts", description = "Root resources owning collections"),
        (name = "collections", description = "Named groups of documents under an account"),
        (name = "documents", description = "Opaque content blobs under a collection"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
