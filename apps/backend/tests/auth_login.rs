// Integration tests for POST /authorization.
//
// Covers JSON and form logins plus every rejection path.

mod common;

use actix_web::http::header::CONTENT_TYPE;
use actix_web::test;
use codevault::GOLD_CODES_READ;
use serde_json::{json, Value};

use crate::common::{content_type, prod_app, test_security};

// ============================================================================
// Happy Path Tests
// ============================================================================

#[actix_web::test]
async fn test_json_login_issues_verifiable_token() {
    let app = prod_app().await;

    let req = test::TestRequest::post()
        .uri("/authorization")
        .set_json(json!({ "username": "alice", "password": "password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    assert!(content_type(&resp).starts_with("application/json"));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["scope"], GOLD_CODES_READ);
    assert_eq!(body["user"]["custom"], "any custom data");

    let token = body["token"].as_str().expect("token should be a string");
    let decoded =
        codevault::verify_access_token(token, &test_security()).expect("JWT should be valid");
    assert_eq!(decoded.claims.username, "alice");
    assert!(decoded.claims.has_scope(GOLD_CODES_READ));
    assert_eq!(
        decoded.exp - decoded.iat,
        test_security().token_ttl.as_secs() as i64
    );
}

#[actix_web::test]
async fn test_form_login_issues_token() {
    let app = prod_app().await;

    let req = test::TestRequest::post()
        .uri("/authorization")
        .insert_header((CONTENT_TYPE, "application/x-www-form-urlencoded"))
        .set_payload("username=bob&password=password")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["username"], "bob");
    assert!(!body["token"].as_str().unwrap_or_default().is_empty());
}

#[actix_web::test]
async fn test_token_is_never_leaked_through_user_object() {
    let app = prod_app().await;

    let req = test::TestRequest::post()
        .uri("/authorization")
        .set_json(json!({ "username": "alice", "password": "password" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let user = body["user"].as_object().expect("user should be an object");
    assert!(!user.contains_key("password"));
    assert!(!user.contains_key("iat"));
    assert!(!user.contains_key("exp"));
}

// ============================================================================
// Rejections
// ============================================================================

async fn assert_unauthorized_login(payload: Value) {
    let app = prod_app().await;

    let req = test::TestRequest::post()
        .uri("/authorization")
        .set_json(payload.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 401, "payload {payload}");
    assert!(content_type(&resp).starts_with("text/plain"));

    let body = test::read_body(resp).await;
    assert_eq!(body, "UnauthorizedError");
}

#[actix_web::test]
async fn test_wrong_password_is_rejected() {
    assert_unauthorized_login(json!({ "username": "alice", "password": "hunter2" })).await;
}

#[actix_web::test]
async fn test_missing_fields_are_rejected() {
    assert_unauthorized_login(json!({ "username": "alice" })).await;
    assert_unauthorized_login(json!({ "password": "password" })).await;
    assert_unauthorized_login(json!({})).await;
}

#[actix_web::test]
async fn test_blank_username_is_rejected() {
    assert_unauthorized_login(json!({ "username": "   ", "password": "password" })).await;
}

#[actix_web::test]
async fn test_rejected_login_issues_no_token() {
    let app = prod_app().await;

    let req = test::TestRequest::post()
        .uri("/authorization")
        .set_json(json!({ "username": "alice", "password": "nope" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.headers().get("authorization").is_none());

    let body = test::read_body(resp).await;
    assert!(!String::from_utf8_lossy(&body).contains('.'));
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let app = prod_app().await;

    let req = test::TestRequest::post()
        .uri("/authorization")
        .insert_header((CONTENT_TYPE, "application/json"))
        .set_payload("{\"username\": \"alice\",")
        .to_request();
    let resp = test::call_service(&app, req).await;

    backend_test_support::error_body::assert_error_body(
        resp,
        actix_web::http::StatusCode::BAD_REQUEST,
        "Invalid JSON: unexpected end of input",
    )
    .await;
}

#[actix_web::test]
async fn test_wrong_field_types_are_invalid_credentials() {
    assert_unauthorized_login(json!({ "username": 42, "password": "password" })).await;
    assert_unauthorized_login(json!({ "username": "alice", "password": ["password"] })).await;
    assert_unauthorized_login(json!({ "username": null, "password": "password" })).await;
}

#[actix_web::test]
async fn test_non_object_json_is_invalid_credentials() {
    assert_unauthorized_login(json!(["alice", "password"])).await;
    assert_unauthorized_login(json!("alice")).await;
}

async fn assert_unauthorized_raw(content_type: Option<&str>, body: &'static str) {
    let app = prod_app().await;

    let mut req = test::TestRequest::post().uri("/authorization");
    if let Some(ct) = content_type {
        req = req.insert_header((CONTENT_TYPE, ct.to_string()));
    }
    let resp = test::call_service(&app, req.set_payload(body).to_request()).await;

    assert_eq!(resp.status().as_u16(), 401, "{content_type:?} {body:?}");
    assert_eq!(test::read_body(resp).await, "UnauthorizedError");
}

#[actix_web::test]
async fn test_unsupported_content_type_is_invalid_credentials() {
    assert_unauthorized_raw(Some("text/plain"), "hello").await;
    assert_unauthorized_raw(
        Some("text/plain"),
        "{\"username\":\"alice\",\"password\":\"password\"}",
    )
    .await;
}

#[actix_web::test]
async fn test_empty_body_is_invalid_credentials() {
    assert_unauthorized_raw(None, "").await;
    assert_unauthorized_raw(Some("application/json"), "").await;
    assert_unauthorized_raw(Some("application/x-www-form-urlencoded"), "").await;
}

#[actix_web::test]
async fn test_get_on_login_route_is_not_found() {
    let app = prod_app().await;

    let req = test::TestRequest::get().uri("/authorization").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 404);
}

#[actix_web::test]
async fn test_oversized_body_is_bad_request() {
    let app = common::create_test_app(common::test_state())
        .with_max_payload_size(16)
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri("/authorization")
        .set_json(json!({ "username": "alice", "password": "password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    backend_test_support::error_body::assert_error_body(
        resp,
        actix_web::http::StatusCode::BAD_REQUEST,
        "Request body exceeds 16 bytes",
    )
    .await;
}
