use actix_web::{web, HttpResponse};
use tracing::info;

use crate::auth::claims::GOLD_CODES_READ;
use crate::error::AppError;
use crate::extractors::current_claims::CurrentClaims;
use crate::middleware::jwt_extract::JwtExtract;
use crate::services::gold_codes::gold_codes;

async fn list_gold_codes(current: CurrentClaims) -> Result<HttpResponse, AppError> {
    current.require_scope(GOLD_CODES_READ)?;

    info!(username = %current.claims.username, "gold codes served");

    Ok(HttpResponse::Ok().json(gold_codes()))
}

/// `/gold_codes` sits behind `JwtExtract`; nothing else in the app does.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        super::resource("/gold_codes")
            .wrap(JwtExtract)
            .route(web::get().to(list_gold_codes)),
    );
}
