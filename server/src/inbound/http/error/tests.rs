//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::rstest;
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Render an error the way actix would and pull the response apart.
async fn render(error: &Error) -> (StatusCode, Option<String>, Error) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("trace-id not valid UTF-8").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("body deserialises as Error");
    (status, header, body)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn each_code_maps_to_its_status(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[actix_web::test]
async fn internal_faults_reach_the_wire_redacted() {
    let error = Error::internal("boom")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"secret": "x"}));

    let (status, header, body) = render(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(body.code(), ErrorCode::InternalError);
    assert_eq!(body.message(), "Internal server error");
    assert_eq!(body.trace_id(), Some(TRACE_ID));
    assert!(body.details().is_none(), "internal details must not leak");
}

#[actix_web::test]
async fn client_errors_keep_message_and_details() {
    let error = Error::invalid_request("bad")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"field": "name"}));

    let (status, header, body) = render(&error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(body.code(), ErrorCode::InvalidRequest);
    assert_eq!(body.message(), "bad");
    assert_eq!(body.details(), Some(&json!({"field": "name"})));
}

#[actix_web::test]
async fn responses_without_trace_id_omit_the_header() {
    let (status, header, body) = render(&Error::not_found("document not found")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(header.is_none(), "trace-id header should not be present");
    assert_eq!(body.code(), ErrorCode::NotFound);
    assert_eq!(body.trace_id(), None);
}

#[test]
fn actix_errors_promote_to_redacted_internal_errors() {
    let promoted: Error = actix_web::error::ErrorBadGateway("upstream exploded").into();

    assert_eq!(promoted.code(), ErrorCode::InternalError);
    assert_eq!(promoted.message(), "Internal server error");
    assert!(promoted.details().is_none());
}
