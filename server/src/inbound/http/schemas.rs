//! OpenAPI schemas for domain error types.
//!
//! The domain crate stays free of framework derives, so the error envelope is
//! described here through utoipa's external schema registration (`as = …`).
//! These wrappers exist only for documentation; the live wire format comes
//! from the `Serialize` impls on the domain types themselves.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Failure categories returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request was malformed or failed validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No such resource within the scope the caller may see.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request clashes with state that already exists.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing service the request needs could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// A fault the client can do nothing about.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// The envelope every non-2xx response carries: a stable code, a message fit
/// for a client, the request's trace identifier, and optional structured
/// details.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Referenced only by the OpenAPI document, never constructed"
)]
pub struct ErrorSchema {
    /// The failure category.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// The client-facing message.
    #[schema(example = "handle already in use")]
    message: String,
    /// Correlation identifier, also echoed in the `trace-id` header.
    #[schema(example = "f7b2f9e4-6b1a-4c62-9a2e-d53b4f0c88a1")]
    trace_id: Option<String>,
    /// Structured context, when the error carries any.
    details: Option<serde_json::Value>,
}
