//! Assembles the HTTP application: routes, middleware, and startup.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, Scope, web};

use folio_server::Trace;
#[cfg(debug_assertions)]
use folio_server::doc::ApiDoc;
use folio_server::inbound::http::accounts::{
    create_account, get_account, list_accounts, remove_account, remove_account_without_id,
    update_account, update_account_without_id,
};
use folio_server::inbound::http::collections::{
    create_collection, get_collection, list_collections, remove_collection,
    remove_collection_without_id, update_collection, update_collection_without_id,
};
use folio_server::inbound::http::documents::{
    create_document, get_document, list_documents, remove_document, remove_document_without_id,
    update_document, update_document_without_id,
};
use folio_server::inbound::http::health::{HealthState, live, ready};
use folio_server::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Shared state handed to every worker's copy of the app.
#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

/// All versioned resource routes, grouped under `/api/v1`.
///
/// Collection routes nest under their owning account and document routes
/// under their owning collection. The `*_without_id` registrations catch
/// requests that omit the trailing identifier so they produce a JSON error
/// rather than a bare 404.
fn api_routes() -> Scope {
    web::scope("/api/v1")
        .service(list_accounts)
        .service(create_account)
        .service(get_account)
        .service(update_account)
        .service(remove_account)
        .service(update_account_without_id)
        .service(remove_account_without_id)
        .service(list_collections)
        .service(create_collection)
        .service(get_collection)
        .service(update_collection)
        .service(remove_collection)
        .service(update_collection_without_id)
        .service(remove_collection_without_id)
        .service(list_documents)
        .service(create_document)
        .service(get_document)
        .service(update_document)
        .service(remove_document)
        .service(update_document_without_id)
        .service(remove_document_without_id)
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(deps.health_state)
        .app_data(deps.http_state)
        .wrap(Trace)
        .service(api_routes())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Build and start the HTTP server described by `config`.
///
/// Readiness flips only after the listener is bound, so orchestrators never
/// route traffic to a worker that cannot accept it yet.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    let worker_health = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: worker_health.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
