//! Document API handlers.
//!
//! ```text
//! GET /api/v1/accounts/{account_id}/collections/{collection_id}/documents
//! POST .../documents {"content":{"title":"draft"}}
//! GET .../documents/{document_id}
//! PUT|PATCH .../documents/{document_id}
//! DELETE .../documents/{document_id}
//! ```
//!
//! The full ancestry (account, then collection) is forwarded on every route
//! and resolved by the domain layer before any document data is touched.
//! PUT, PATCH, and DELETE on the bare `…/documents` path forward no target
//! identifier and are rejected with a missing-identifier error.

use actix_web::{HttpResponse, delete, get, post, route, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::Document;
use crate::domain::ports::DocumentPatch;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request payload for creating or patching a document.
///
/// `content` is an opaque blob; when omitted on create it defaults to an
/// empty object. The parent collection comes from the path; a
/// `parentCollectionId` field in the body is ignored along with any other
/// unknown field.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPayload {
    pub content: Option<Value>,
}

/// Response payload for a stored document.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    pub id: String,
    pub content: Value,
    pub parent_collection_id: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Document> for DocumentResponse {
    fn from(value: Document) -> Self {
        Self {
            id: value.id().to_string(),
            content: value.content().clone(),
            parent_collection_id: value.parent_collection_id().to_string(),
            created_at: value.created_at().to_rfc3339(),
            updated_at: value.updated_at().to_rfc3339(),
        }
    }
}

/// List the documents in a collection.
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{account_id}/collections/{collection_id}/documents",
    params(
        ("account_id" = String, Path, description = "Owning account identifier"),
        ("collection_id" = String, Path, description = "Parent collection identifier")
    ),
    responses(
        (status = 200, description = "Documents", body = [DocumentResponse]),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Account or collection not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "listDocuments"
)]
#[get("/accounts/{account_id}/collections/{collection_id}/documents")]
pub async fn list_documents(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<Vec<DocumentResponse>>> {
    let (account_id, collection_id) = path.into_inner();
    let documents = state
        .documents_query
        .list(&account_id, &collection_id)
        .await?;
    Ok(web::Json(
        documents.into_iter().map(DocumentResponse::from).collect(),
    ))
}

/// Create a document under a collection.
#[utoipa::path(
    post,
    path = "/api/v1/accounts/{account_id}/collections/{collection_id}/documents",
    params(
        ("account_id" = String, Path, description = "Owning account identifier"),
        ("collection_id" = String, Path, description = "Parent collection identifier")
    ),
    request_body = DocumentPayload,
    responses(
        (status = 201, description = "Stored document", body = DocumentResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Account or collection not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "createDocument"
)]
#[post("/accounts/{account_id}/collections/{collection_id}/documents")]
pub async fn create_document(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    payload: web::Json<DocumentPayload>,
) -> ApiResult<HttpResponse> {
    let (account_id, collection_id) = path.into_inner();
    let content = payload.into_inner().content;
    let document = state
        .documents
        .create(&account_id, &collection_id, content)
        .await?;
    Ok(HttpResponse::Created().json(DocumentResponse::from(document)))
}

/// Fetch a single document scoped to its parent collection.
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{account_id}/collections/{collection_id}/documents/{document_id}",
    params(
        ("account_id" = String, Path, description = "Owning account identifier"),
        ("collection_id" = String, Path, description = "Parent collection identifier"),
        ("document_id" = String, Path, description = "Document identifier")
    ),
    responses(
        (status = 200, description = "Document", body = DocumentResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Chain member not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "getDocument"
)]
#[get("/accounts/{account_id}/collections/{collection_id}/documents/{document_id}")]
pub async fn get_document(
    state: web::Data<HttpState>,
    path: web::Path<(String, String, String)>,
) -> ApiResult<web::Json<DocumentResponse>> {
    let (account_id, collection_id, document_id) = path.into_inner();
    let document = state
        .documents_query
        .get(&account_id, &collection_id, &document_id)
        .await?;
    Ok(web::Json(DocumentResponse::from(document)))
}

/// Replace the content of a stored document.
#[utoipa::path(
    method(put, patch),
    path = "/api/v1/accounts/{account_id}/collections/{collection_id}/documents/{document_id}",
    params(
        ("account_id" = String, Path, description = "Owning account identifier"),
        ("collection_id" = String, Path, description = "Parent collection identifier"),
        ("document_id" = String, Path, description = "Document identifier")
    ),
    request_body = DocumentPayload,
    responses(
        (status = 200, description = "Updated document", body = DocumentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Chain member not found", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "updateDocument"
)]
#[route(
    "/accounts/{account_id}/collections/{collection_id}/documents/{document_id}",
    method = "PUT",
    method = "PATCH"
)]
pub async fn update_document(
    state: web::Data<HttpState>,
    path: web::Path<(String, String, String)>,
    payload: web::Json<DocumentPayload>,
) -> ApiResult<web::Json<DocumentResponse>> {
    let (account_id, collection_id, document_id) = path.into_inner();
    let patch = DocumentPatch {
        content: payload.into_inner().content,
    };
    let document = state
        .documents
        .update(&account_id, &collection_id, Some(&document_id), patch)
        .await?;
    Ok(web::Json(DocumentResponse::from(document)))
}

/// Delete a document and return the pre-deletion record.
#[utoipa::path(
    delete,
    path = "/api/v1/accounts/{account_id}/collections/{collection_id}/documents/{document_id}",
    params(
        ("account_id" = String, Path, description = "Owning account identifier"),
        ("collection_id" = String, Path, description = "Parent collection identifier"),
        ("document_id" = String, Path, description = "Document identifier")
    ),
    responses(
        (status = 200, description = "Deleted document", body = DocumentResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Chain member not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "deleteDocument"
)]
#[delete("/accounts/{account_id}/collections/{collection_id}/documents/{document_id}")]
pub async fn remove_document(
    state: web::Data<HttpState>,
    path: web::Path<(String, String, String)>,
) -> ApiResult<web::Json<DocumentResponse>> {
    let (account_id, collection_id, document_id) = path.into_inner();
    let document = state
        .documents
        .remove(&account_id, &collection_id, Some(&document_id))
        .await?;
    Ok(web::Json(DocumentResponse::from(document)))
}

/// Reject an update that carries no document identifier.
#[utoipa::path(
    method(put, patch),
    path = "/api/v1/accounts/{account_id}/collections/{collection_id}/documents",
    params(
        ("account_id" = String, Path, description = "Owning account identifier"),
        ("collection_id" = String, Path, description = "Parent collection identifier")
    ),
    responses(
        (status = 400, description = "Missing document identifier", body = ErrorSchema),
        (status = 404, description = "Account or collection not found", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "updateDocumentWithoutId"
)]
#[route(
    "/accounts/{account_id}/collections/{collection_id}/documents",
    method = "PUT",
    method = "PATCH"
)]
pub async fn update_document_without_id(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<DocumentResponse>> {
    let (account_id, collection_id) = path.into_inner();
    let document = state
        .documents
        .update(&account_id, &collection_id, None, DocumentPatch::default())
        .await?;
    Ok(web::Json(DocumentResponse::from(document)))
}

/// Reject a delete that carries no document identifier.
#[utoipa::path(
    delete,
    path = "/api/v1/accounts/{account_id}/collections/{collection_id}/documents",
    params(
        ("account_id" = String, Path, description = "Owning account identifier"),
        ("collection_id" = String, Path, description = "Parent collection identifier")
    ),
    responses(
        (status = 400, description = "Missing document identifier", body = ErrorSchema),
        (status = 404, description = "Account or collection not found", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "deleteDocumentWithoutId"
)]
#[delete("/accounts/{account_id}/collections/{collection_id}/documents")]
pub async fn remove_document_without_id(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<DocumentResponse>> {
    let (account_id, collection_id) = path.into_inner();
    let document = state
        .documents
        .remove(&account_id, &collection_id, None)
        .await?;
    Ok(web::Json(DocumentResponse::from(document)))
}
