//! Error builders for create/update payload validation.
//!
//! Identifier syntax is checked in the domain layer; these helpers cover the
//! payload-shape failures the handlers detect before calling a service.

use serde_json::json;

use crate::domain::Error;

fn payload_error(message: String, field: &'static str, code: &'static str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

/// Rejection for a payload missing a mandatory field.
pub(crate) fn missing_field_error(field: &'static str) -> Error {
    payload_error(
        format!("missing required field: {field}"),
        field,
        "missing_field",
    )
}

/// Rejection for a handle that trims to nothing.
pub(crate) fn empty_handle_error() -> Error {
    payload_error(
        "handle must not be empty".to_owned(),
        "handle",
        "empty_handle",
    )
}
