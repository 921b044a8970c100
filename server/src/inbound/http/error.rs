//! Actix integration for the domain error type.
//!
//! Handlers return `Result<_, domain::Error>` and never build responses for
//! failures themselves; the `ResponseError` impl here owns the status
//! mapping, the `trace-id` response header, and the redaction of internal
//! faults.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias used by every HTTP handler.
pub type ApiResult<T> = Result<T, Error>;

/// Body actually sent to the client.
///
/// Internal faults are replaced by a generic envelope so messages and
/// details from the storage layer never reach the wire; the trace id
/// survives so the fault can still be correlated with the logs.
fn wire_body(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    let generic = Error::internal("Internal server error");
    match error.trace_id() {
        Some(id) => generic.with_trace_id(id.to_owned()),
        None => generic,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.code() {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(wire_body(self))
    }
}

/// Framework errors surface as redacted internal errors rather than leaking
/// extractor or routing internals.
impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests;
