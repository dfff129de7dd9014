//! Error body test helpers
//!
//! Assertions for the backend's `{status, message}` error contract that don't
//! depend on backend types.

use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;

/// Local mirror of the backend's error body.
#[derive(Debug, Deserialize)]
pub struct ErrorBodyLike {
    pub status: u16,
    pub message: String,
}

/// Assert that response parts conform to the error contract:
///
/// - HTTP status matches `expected_status`
/// - `x-trace-id` header is present and non-empty
/// - body is exactly `{status, message}` with matching values
pub fn assert_error_body_from_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body_bytes: &[u8],
    expected_status: StatusCode,
    expected_message: &str,
) -> ErrorBodyLike {
    assert_eq!(status, expected_status);

    let trace_id = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be valid UTF-8");
    assert!(!trace_id.is_empty(), "x-trace-id header should not be empty");

    let value: serde_json::Value =
        serde_json::from_slice(body_bytes).expect("error body should be valid JSON");
    let fields = value.as_object().expect("error body should be an object");
    assert_eq!(
        fields.len(),
        2,
        "error body should only carry status and message, got {value}"
    );

    let body: ErrorBodyLike =
        serde_json::from_value(value).expect("error body should be {status, message}");
    assert_eq!(body.status, expected_status.as_u16());
    assert_eq!(body.message, expected_message);

    body
}

/// Same as `assert_error_body_from_parts`, for a test `ServiceResponse`.
pub async fn assert_error_body<B>(
    resp: actix_web::dev::ServiceResponse<B>,
    expected_status: StatusCode,
    expected_message: &str,
) -> ErrorBodyLike
where
    B: actix_web::body::MessageBody,
{
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;

    assert_error_body_from_parts(status, &headers, &body, expected_status, expected_message)
}
