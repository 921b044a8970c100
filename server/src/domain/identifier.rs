//! Path identifier validation shared by the resolver services.
//!
//! Identifiers are only accepted in canonical UUID form (8-4-4-4-12 hex
//! groups, case-insensitive). Alternate encodings the `uuid` crate would
//! otherwise parse, such as simple, braced, or URN forms, are rejected so
//! that lookups never run against an identifier the caller could not have
//! received from this service.

use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;

/// True iff `value` is the canonical textual form of `parsed`.
fn is_canonical(value: &str, parsed: &Uuid) -> bool {
    let mut buffer = Uuid::encode_buffer();
    let canonical = parsed.hyphenated().encode_lower(&mut buffer);
    value.eq_ignore_ascii_case(canonical)
}

fn invalid_id_error(field: &'static str, value: &str) -> Error {
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": "invalid_uuid",
    }))
}

fn missing_id_error(field: &'static str) -> Error {
    Error::invalid_request(format!("{field} is required")).with_details(json!({
        "field": field,
        "code": "missing_id",
    }))
}

/// Parse a path identifier, rejecting anything but canonical UUID form.
pub(crate) fn parse_id(value: &str, field: &'static str) -> Result<Uuid, Error> {
    Uuid::try_parse(value)
        .ok()
        .filter(|parsed| is_canonical(value, parsed))
        .ok_or_else(|| invalid_id_error(field, value))
}

/// Require an identifier that the route could not supply on its own.
///
/// Update and delete operations addressed without a target identifier reach
/// the services as `None`; blank values are treated the same way.
pub(crate) fn require_id<'a>(
    value: Option<&'a str>,
    field: &'static str,
) -> Result<&'a str, Error> {
    match value {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(missing_id_error(field)),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    #[case("3FA85F64-5717-4562-B3FC-2C963F66AFA6")]
    fn parse_id_accepts_canonical_forms(#[case] value: &str) {
        let parsed = parse_id(value, "accountId").expect("canonical form parses");
        assert_eq!(
            parsed,
            Uuid::parse_str(value).expect("uuid crate agrees on the value")
        );
    }

    #[rstest]
    #[case("3fa85f6457174562b3fc2c963f66afa6")]
    #[case("{3fa85f64-5717-4562-b3fc-2c963f66afa6}")]
    #[case("urn:uuid:3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    #[case("3fa85f64-5717-4562-b3fc")]
    #[case("not-a-uuid")]
    #[case("")]
    fn parse_id_rejects_non_canonical_forms(#[case] value: &str) {
        let error = parse_id(value, "collectionId").expect_err("non-canonical form fails");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let details = error.details().expect("details present");
        assert_eq!(
            details.get("field").and_then(serde_json::Value::as_str),
            Some("collectionId")
        );
        assert_eq!(
            details.get("code").and_then(serde_json::Value::as_str),
            Some("invalid_uuid")
        );
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn require_id_rejects_missing_values(#[case] value: Option<&str>) {
        let error = require_id(value, "documentId").expect_err("missing id fails");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let details = error.details().expect("details present");
        assert_eq!(
            details.get("code").and_then(serde_json::Value::as_str),
            Some("missing_id")
        );
    }

    #[test]
    fn require_id_passes_present_values_through() {
        let id = require_id(Some("abc"), "documentId").expect("present id passes");
        assert_eq!(id, "abc");
    }
}
