//! Account API handlers.
//!
//! ```text
//! GET /api/v1/accounts
//! POST /api/v1/accounts {"handle":"ada"}
//! GET /api/v1/accounts/{account_id}
//! PUT|PATCH /api/v1/accounts/{account_id}
//! DELETE /api/v1/accounts/{account_id}
//! ```
//!
//! PUT, PATCH, and DELETE on the bare `/accounts` path are routed to
//! handlers that forward no target identifier, so the domain layer rejects
//! them with a missing-identifier error.

use actix_web::{HttpResponse, delete, get, post, route, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::AccountPatch;
use crate::domain::{Account, Error, Handle, HandleValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{empty_handle_error, missing_field_error};

/// Request payload for creating or patching an account.
///
/// Unknown fields (including attempts to set `id` or timestamps) are
/// silently dropped; stored identity stays authoritative.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountPayload {
    pub handle: Option<String>,
}

/// Response payload for a stored account.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: String,
    pub handle: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Account> for AccountResponse {
    fn from(value: Account) -> Self {
        Self {
            id: value.id().to_string(),
            handle: value.handle().to_string(),
            created_at: value.created_at().to_rfc3339(),
            updated_at: value.updated_at().to_rfc3339(),
        }
    }
}

fn map_handle_validation_error(err: HandleValidationError) -> Error {
    match err {
        HandleValidationError::Empty => empty_handle_error(),
    }
}

fn parse_handle(value: String) -> Result<Handle, Error> {
    Handle::new(value).map_err(map_handle_validation_error)
}

fn parse_create_payload(payload: AccountPayload) -> Result<Handle, Error> {
    payload
        .handle
        .ok_or_else(|| missing_field_error("handle"))
        .and_then(parse_handle)
}

fn parse_patch_payload(payload: AccountPayload) -> Result<AccountPatch, Error> {
    let handle = payload.handle.map(parse_handle).transpose()?;
    Ok(AccountPatch { handle })
}

/// List every account.
#[utoipa::path(
    get,
    path = "/api/v1/accounts",
    responses(
        (status = 200, description = "Accounts", body = [AccountResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "listAccounts"
)]
#[get("/accounts")]
pub async fn list_accounts(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<AccountResponse>>> {
    let accounts = state.accounts_query.list().await?;
    Ok(web::Json(
        accounts.into_iter().map(AccountResponse::from).collect(),
    ))
}

/// Create an account claiming the supplied handle.
#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    request_body = AccountPayload,
    responses(
        (status = 201, description = "Stored account", body = AccountResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Handle already in use", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "createAccount"
)]
#[post("/accounts")]
pub async fn create_account(
    state: web::Data<HttpState>,
    payload: web::Json<AccountPayload>,
) -> ApiResult<HttpResponse> {
    let handle = parse_create_payload(payload.into_inner())?;
    let account = state.accounts.create(handle).await?;
    Ok(HttpResponse::Created().json(AccountResponse::from(account)))
}

/// Fetch a single account by id.
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{account_id}",
    params(("account_id" = String, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "Account", body = AccountResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Account not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "getAccount"
)]
#[get("/accounts/{account_id}")]
pub async fn get_account(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<AccountResponse>> {
    let account_id = path.into_inner();
    let account = state.accounts_query.get(&account_id).await?;
    Ok(web::Json(AccountResponse::from(account)))
}

/// Merge the supplied fields over a stored account.
#[utoipa::path(
    method(put, patch),
    path = "/api/v1/accounts/{account_id}",
    params(("account_id" = String, Path, description = "Account identifier")),
    request_body = AccountPayload,
    responses(
        (status = 200, description = "Updated account", body = AccountResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Account not found", body = ErrorSchema),
        (status = 409, description = "Handle already in use", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "updateAccount"
)]
#[route("/accounts/{account_id}", method = "PUT", method = "PATCH")]
pub async fn update_account(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<AccountPayload>,
) -> ApiResult<web::Json<AccountResponse>> {
    let account_id = path.into_inner();
    let patch = parse_patch_payload(payload.into_inner())?;
    let account = state.accounts.update(Some(&account_id), patch).await?;
    Ok(web::Json(AccountResponse::from(account)))
}

/// Delete an account and return the pre-deletion record.
#[utoipa::path(
    delete,
    path = "/api/v1/accounts/{account_id}",
    params(("account_id" = String, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "Deleted account", body = AccountResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Account not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "deleteAccount"
)]
#[delete("/accounts/{account_id}")]
pub async fn remove_account(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<AccountResponse>> {
    let account_id = path.into_inner();
    let account = state.accounts.remove(Some(&account_id)).await?;
    Ok(web::Json(AccountResponse::from(account)))
}

/// Reject an update that carries no account identifier.
#[utoipa::path(
    method(put, patch),
    path = "/api/v1/accounts",
    responses(
        (status = 400, description = "Missing account identifier", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "updateAccountWithoutId"
)]
#[route("/accounts", method = "PUT", method = "PATCH")]
pub async fn update_account_without_id(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<AccountResponse>> {
    let account = state.accounts.update(None, AccountPatch::default()).await?;
    Ok(web::Json(AccountResponse::from(account)))
}

/// Reject a delete that carries no account identifier.
#[utoipa::path(
    delete,
    path = "/api/v1/accounts",
    responses(
        (status = 400, description = "Missing account identifier", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "deleteAccountWithoutId"
)]
#[delete("/accounts")]
pub async fn remove_account_without_id(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<AccountResponse>> {
    let account = state.accounts.remove(None).await?;
    Ok(web::Json(AccountResponse::from(account)))
}
