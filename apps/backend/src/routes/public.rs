use actix_web::{web, HttpResponse};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct SkyResponse {
    sky: &'static str,
}

/// Open to everyone; never looks at the `Authorization` header.
async fn unprotected() -> HttpResponse {
    HttpResponse::Ok().json(SkyResponse { sky: "blue" })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(super::resource("/unprotected").route(web::get().to(unprotected)));
}
