//! Collection API handlers.
//!
//! ```text
//! GET /api/v1/accounts/{account_id}/collections
//! POST /api/v1/accounts/{account_id}/collections {"name":"field notes"}
//! GET /api/v1/accounts/{account_id}/collections/{collection_id}
//! PUT|PATCH /api/v1/accounts/{account_id}/collections/{collection_id}
//! DELETE /api/v1/accounts/{account_id}/collections/{collection_id}
//! ```
//!
//! Every route forwards the raw path identifiers to the domain layer, which
//! resolves the owning account before touching collection data. PUT, PATCH,
//! and DELETE on the bare `…/collections` path forward no target identifier
//! and are rejected with a missing-identifier error.

use actix_web::{HttpResponse, delete, get, post, route, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CollectionPatch;
use crate::domain::{Collection, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::missing_field_error;

/// Request payload for creating or patching a collection.
///
/// The owning account comes from the path; an `ownerAccountId` field in the
/// body is ignored along with any other unknown field.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPayload {
    pub name: Option<String>,
}

/// Response payload for a stored collection.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollectionResponse {
    pub id: String,
    pub name: String,
    pub owner_account_id: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Collection> for CollectionResponse {
    fn from(value: Collection) -> Self {
        Self {
            id: value.id().to_string(),
            name: value.name().to_owned(),
            owner_account_id: value.owner_account_id().to_string(),
            created_at: value.created_at().to_rfc3339(),
            updated_at: value.updated_at().to_rfc3339(),
        }
    }
}

fn parse_create_payload(payload: CollectionPayload) -> Result<String, Error> {
    payload.name.ok_or_else(|| missing_field_error("name"))
}

fn parse_patch_payload(payload: CollectionPayload) -> CollectionPatch {
    CollectionPatch { name: payload.name }
}

/// List the collections owned by an account.
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{account_id}/collections",
    params(("account_id" = String, Path, description = "Owning account identifier")),
    responses(
        (status = 200, description = "Collections", body = [CollectionResponse]),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Account not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["collections"],
    operation_id = "listCollections"
)]
#[get("/accounts/{account_id}/collections")]
pub async fn list_collections(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<CollectionResponse>>> {
    let account_id = path.into_inner();
    let collections = state.collections_query.list(&account_id).await?;
    Ok(web::Json(
        collections.into_iter().map(CollectionResponse::from).collect(),
    ))
}

/// Create a collection under an account.
#[utoipa::path(
    post,
    path = "/api/v1/accounts/{account_id}/collections",
    params(("account_id" = String, Path, description = "Owning account identifier")),
    request_body = CollectionPayload,
    responses(
        (status = 201, description = "Stored collection", body = CollectionResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Account not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["collections"],
    operation_id = "createCollection"
)]
#[post("/accounts/{account_id}/collections")]
pub async fn create_collection(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<CollectionPayload>,
) -> ApiResult<HttpResponse> {
    let account_id = path.into_inner();
    let name = parse_create_payload(payload.into_inner())?;
    let collection = state.collections.create(&account_id, name).await?;
    Ok(HttpResponse::Created().json(CollectionResponse::from(collection)))
}

/// Fetch a single collection scoped to its owner.
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{account_id}/collections/{collection_id}",
    params(
        ("account_id" = String, Path, description = "Owning account identifier"),
        ("collection_id" = String, Path, description = "Collection identifier")
    ),
    responses(
        (status = 200, description = "Collection", body = CollectionResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Account or collection not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["collections"],
    operation_id = "getCollection"
)]
#[get("/accounts/{account_id}/collections/{collection_id}")]
pub async fn get_collection(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<CollectionResponse>> {
    let (account_id, collection_id) = path.into_inner();
    let collection = state
        .collections_query
        .get(&account_id, &collection_id)
        .await?;
    Ok(web::Json(CollectionResponse::from(collection)))
}

/// Merge the supplied fields over a stored collection.
#[utoipa::path(
    method(put, patch),
    path = "/api/v1/accounts/{account_id}/collections/{collection_id}",
    params(
        ("account_id" = String, Path, description = "Owning account identifier"),
        ("collection_id" = String, Path, description = "Collection identifier")
    ),
    request_body = CollectionPayload,
    responses(
        (status = 200, description = "Updated collection", body = CollectionResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Account or collection not found", body = ErrorSchema)
    ),
    tags = ["collections"],
    operation_id = "updateCollection"
)]
#[route(
    "/accounts/{account_id}/collections/{collection_id}",
    method = "PUT",
    method = "PATCH"
)]
pub async fn update_collection(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    payload: web::Json<CollectionPayload>,
) -> ApiResult<web::Json<CollectionResponse>> {
    let (account_id, collection_id) = path.into_inner();
    let patch = parse_patch_payload(payload.into_inner());
    let collection = state
        .collections
        .update(&account_id, Some(&collection_id), patch)
        .await?;
    Ok(web::Json(CollectionResponse::from(collection)))
}

/// Delete a collection and return the pre-deletion record.
#[utoipa::path(
    delete,
    path = "/api/v1/accounts/{account_id}/collections/{collection_id}",
    params(
        ("account_id" = String, Path, description = "Owning account identifier"),
        ("collection_id" = String, Path, description = "Collection identifier")
    ),
    responses(
        (status = 200, description = "Deleted collection", body = CollectionResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Account or collection not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["collections"],
    operation_id = "deleteCollection"
)]
#[delete("/accounts/{account_id}/collections/{collection_id}")]
pub async fn remove_collection(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<CollectionResponse>> {
    let (account_id, collection_id) = path.into_inner();
    let collection = state
        .collections
        .remove(&account_id, Some(&collection_id))
        .await?;
    Ok(web::Json(CollectionResponse::from(collection)))
}

/// Reject an update that carries no collection identifier.
#[utoipa::path(
    method(put, patch),
    path = "/api/v1/accounts/{account_id}/collections",
    params(("account_id" = String, Path, description = "Owning account identifier")),
    responses(
        (status = 400, description = "Missing collection identifier", body = ErrorSchema),
        (status = 404, description = "Account not found", body = ErrorSchema)
    ),
    tags = ["collections"],
    operation_id = "updateCollectionWithoutId"
)]
#[route(
    "/accounts/{account_id}/collections",
    method = "PUT",
    method = "PATCH"
)]
pub async fn update_collection_without_id(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CollectionResponse>> {
    let account_id = path.into_inner();
    let collection = state
        .collections
        .update(&account_id, None, CollectionPatch::default())
        .await?;
    Ok(web::Json(CollectionResponse::from(collection)))
}

/// Reject a delete that carries no collection identifier.
#[utoipa::path(
    delete,
    path = "/api/v1/accounts/{account_id}/collections",
    params(("account_id" = String, Path, description = "Owning account identifier")),
    responses(
        (status = 400, description = "Missing collection identifier", body = ErrorSchema),
        (status = 404, description = "Account not found", body = ErrorSchema)
    ),
    tags = ["collections"],
    operation_id = "deleteCollectionWithoutId"
)]
#[delete("/accounts/{account_id}/collections")]
pub async fn remove_collection_without_id(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CollectionResponse>> {
    let account_id = path.into_inner();
    let collection = state.collections.remove(&account_id, None).await?;
    Ok(web::Json(CollectionResponse::from(collection)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        MockAccountsCommand, MockAccountsQuery, MockCollectionsCommand, MockCollectionsQuery,
        MockDocumentsCommand, MockDocumentsQuery,
    };
    use crate::domain::{AccountId, CollectionId};
    use actix_web::{App, test as actix_test, web};
    use chrono::Utc;
    use serde_json::{Value, json};
    use std::sync::Arc;

    const OWNER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
    const COLLECTION_ID: &str = "b0f4dc51-7bd8-4bfd-b526-9a6b37b48bf1";

    fn sample_collection() -> Collection {
        let now = Utc::now();
        Collection::new(
            CollectionId::random(),
            "field notes",
            AccountId::random(),
            now,
            now,
        )
    }

    struct StatePorts {
        collections: MockCollectionsCommand,
        collections_query: MockCollectionsQuery,
    }

    impl Default for StatePorts {
        fn default() -> Self {
            Self {
                collections: MockCollectionsCommand::new(),
                collections_query: MockCollectionsQuery::new(),
            }
        }
    }

    fn state_from(ports: StatePorts) -> HttpState {
        HttpState {
            accounts: Arc::new(MockAccountsCommand::new()),
            accounts_query: Arc::new(MockAccountsQuery::new()),
            collections: Arc::new(ports.collections),
            collections_query: Arc::new(ports.collections_query),
            documents: Arc::new(MockDocumentsCommand::new()),
            documents_query: Arc::new(MockDocumentsQuery::new()),
        }
    }

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(web::Data::new(state)).service(
            web::scope("/api/v1")
                .service(list_collections)
                .service(create_collection)
                .service(get_collection)
                .service(update_collection)
                .service(remove_collection)
                .service(update_collection_without_id)
                .service(remove_collection_without_id),
        )
    }

    async fn read_json(response: actix_web::dev::ServiceResponse) -> Value {
        let body = actix_test::read_body(response).await;
        serde_json::from_slice(&body).expect("JSON body")
    }

    #[actix_web::test]
    async fn create_collection_forwards_owner_and_name() {
        let collection = sample_collection();
        let mut ports = StatePorts::default();
        ports
            .collections
            .expect_create()
            .return_once(move |account_id, name| {
                assert_eq!(account_id, OWNER_ID);
                assert_eq!(name, "field notes");
                Ok(collection)
            });
        let app = actix_test::init_service(test_app(state_from(ports))).await;

        let request = actix_test::TestRequest::post()
            .uri(&format!("/api/v1/accounts/{OWNER_ID}/collections"))
            .set_json(json!({"name": "field notes"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
        let body = read_json(response).await;
        assert_eq!(
            body.get("name").and_then(Value::as_str),
            Some("field notes")
        );
        assert!(body.get("ownerAccountId").is_some(), "camelCase owner edge");
    }

    #[actix_web::test]
    async fn create_collection_without_name_is_rejected() {
        let app = actix_test::init_service(test_app(state_from(StatePorts::default()))).await;

        let request = actix_test::TestRequest::post()
            .uri(&format!("/api/v1/accounts/{OWNER_ID}/collections"))
            .set_json(json!({}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("missing required field: name")
        );
        let details = body.get("details").and_then(Value::as_object).expect("details");
        assert_eq!(details.get("field").and_then(Value::as_str), Some("name"));
    }

    #[actix_web::test]
    async fn owner_field_in_body_is_ignored() {
        let collection = sample_collection();
        let mut ports = StatePorts::default();
        ports
            .collections
            .expect_create()
            .return_once(move |account_id, _| {
                assert_eq!(account_id, OWNER_ID);
                Ok(collection)
            });
        let app = actix_test::init_service(test_app(state_from(ports))).await;

        let request = actix_test::TestRequest::post()
            .uri(&format!("/api/v1/accounts/{OWNER_ID}/collections"))
            .set_json(json!({
                "name": "field notes",
                "ownerAccountId": "11111111-1111-1111-1111-111111111111",
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
    }

    #[actix_web::test]
    async fn get_collection_forwards_both_path_identifiers() {
        let collection = sample_collection();
        let mut ports = StatePorts::default();
        ports
            .collections_query
            .expect_get()
            .return_once(move |account_id, collection_id| {
                assert_eq!(account_id, OWNER_ID);
                assert_eq!(collection_id, COLLECTION_ID);
                Ok(collection)
            });
        let app = actix_test::init_service(test_app(state_from(ports))).await;

        let request = actix_test::TestRequest::get()
            .uri(&format!(
                "/api/v1/accounts/{OWNER_ID}/collections/{COLLECTION_ID}"
            ))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), actix_web::http::StatusCode::OK);
    }

    #[actix_web::test]
    async fn cross_owner_lookup_surfaces_as_not_found() {
        let mut ports = StatePorts::default();
        ports
            .collections_query
            .expect_get()
            .return_once(|_, _| Err(Error::not_found("collection not found")));
        let app = actix_test::init_service(test_app(state_from(ports))).await;

        let request = actix_test::TestRequest::get()
            .uri(&format!(
                "/api/v1/accounts/{OWNER_ID}/collections/{COLLECTION_ID}"
            ))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
        let body = read_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("collection not found")
        );
    }

    #[actix_web::test]
    async fn update_collection_forwards_target_id_and_patch() {
        let collection = sample_collection();
        let mut ports = StatePorts::default();
        ports
            .collections
            .expect_update()
            .return_once(move |account_id, collection_id, patch| {
                assert_eq!(account_id, OWNER_ID);
                assert_eq!(collection_id, Some(COLLECTION_ID));
                assert_eq!(patch.name.as_deref(), Some("renamed"));
                Ok(collection)
            });
        let app = actix_test::init_service(test_app(state_from(ports))).await;

        let request = actix_test::TestRequest::patch()
            .uri(&format!(
                "/api/v1/accounts/{OWNER_ID}/collections/{COLLECTION_ID}"
            ))
            .set_json(json!({"name": "renamed"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), actix_web::http::StatusCode::OK);
    }

    #[actix_web::test]
    async fn update_on_bare_path_forwards_no_target_id() {
        let mut ports = StatePorts::default();
        ports
            .collections
            .expect_update()
            .return_once(|account_id, collection_id, _| {
                assert_eq!(account_id, OWNER_ID);
                assert!(collection_id.is_none());
                Err(Error::invalid_request("collectionId is required")
                    .with_details(json!({"field": "collectionId", "code": "missing_id"})))
            });
        let app = actix_test::init_service(test_app(state_from(ports))).await;

        let request = actix_test::TestRequest::put()
            .uri(&format!("/api/v1/accounts/{OWNER_ID}/collections"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("collectionId is required")
        );
    }

    #[actix_web::test]
    async fn remove_collection_returns_the_pre_deletion_record() {
        let collection = sample_collection();
        let expected_id = collection.id().to_string();
        let mut ports = StatePorts::default();
        ports
            .collections
            .expect_remove()
            .return_once(move |account_id, collection_id| {
                assert_eq!(account_id, OWNER_ID);
                assert_eq!(collection_id, Some(COLLECTION_ID));
                Ok(collection)
            });
        let app = actix_test::init_service(test_app(state_from(ports))).await;

        let request = actix_test::TestRequest::delete()
            .uri(&format!(
                "/api/v1/accounts/{OWNER_ID}/collections/{COLLECTION_ID}"
            ))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), actix_web::http::StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(
            body.get("id").and_then(Value::as_str),
            Some(expected_id.as_str())
        );
    }

    #[actix_web::test]
    async fn delete_on_bare_path_forwards_no_target_id() {
        let mut ports = StatePorts::default();
        ports
            .collections
            .expect_remove()
            .return_once(|_, collection_id| {
                assert!(collection_id.is_none());
                Err(Error::invalid_request("collectionId is required")
                    .with_details(json!({"field": "collectionId", "code": "missing_id"})))
            });
        let app = actix_test::init_service(test_app(state_from(ports))).await;

        let request = actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/accounts/{OWNER_ID}/collections"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
