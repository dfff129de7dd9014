use actix_web::{web, HttpRequest, HttpResponse};

use crate::error::AppError;

pub mod auth;
pub mod gold_codes;
pub mod health;
pub mod public;

/// Resource whose unmatched methods fall through to the 404 handler instead
/// of actix's bare 405.
fn resource(path: &str) -> actix_web::Resource {
    web::resource(path).default_service(web::to(not_found))
}

/// Fallback for anything no route matched.
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::not_found(format!(
        "{} {}",
        req.method(),
        req.path()
    )))
}

/// Register every application route plus the 404 fallback.
///
/// Only `/gold_codes` is gated; see `gold_codes::configure_routes`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(auth::configure_routes)
        .configure(public::configure_routes)
        .configure(gold_codes::configure_routes)
        .default_service(web::to(not_found));
}
