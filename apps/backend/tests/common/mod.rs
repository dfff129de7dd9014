#![allow(dead_code)]

// tests/common/mod.rs
use std::time::SystemTime;

use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header::{HeaderName, CONTENT_TYPE};
use actix_web::{test, Error as ActixError};
use codevault::state::{AppState, SecurityConfig};
use codevault::{mint_access_token, Claims};
use serde_json::{json, Value};

pub mod app_builder;
pub mod proptest_prelude;

pub use app_builder::create_test_app;

// Logging is auto-installed for most test binaries
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

pub const TEST_SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET)
}

pub fn test_state() -> AppState {
    AppState::new(test_security())
}

/// Production routes and middleware over `test_state()`.
pub async fn prod_app(
) -> impl Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = ActixError> {
    create_test_app(test_state()).with_prod_routes().build().await
}

/// Log in through `POST /authorization` and return the issued token.
pub async fn login<S>(app: &S, username: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = ActixError>,
{
    let req = test::TestRequest::post()
        .uri("/authorization")
        .set_json(json!({ "username": username, "password": "password" }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 200, "login should succeed");

    let body: Value = test::read_body_json(resp).await;
    body["token"]
        .as_str()
        .expect("token should be a string")
        .to_string()
}

/// Mint a token directly, bypassing the login route.
pub fn mint(claims: &Claims, now: SystemTime) -> String {
    mint_access_token(claims, now, &test_security()).expect("mint should succeed")
}

/// The error trace header must echo the request id assigned by `RequestTrace`.
pub fn assert_trace_headers_match(resp: &ServiceResponse<BoxBody>) {
    let request_id = resp
        .headers()
        .get(HeaderName::from_static("x-request-id"))
        .and_then(|v| v.to_str().ok())
        .expect("x-request-id header should be present");
    let trace_id = resp
        .headers()
        .get(HeaderName::from_static("x-trace-id"))
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header should be present");

    assert_eq!(request_id, trace_id);
}

pub fn content_type(resp: &ServiceResponse<BoxBody>) -> String {
    resp.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
