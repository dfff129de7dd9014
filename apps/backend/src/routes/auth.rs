use std::time::SystemTime;

use actix_web::{web, HttpResponse};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use crate::auth::claims::{Claims, GOLD_CODES_READ};
use crate::auth::credentials;
use crate::auth::jwt::mint_access_token;
use crate::error::AppError;
use crate::extractors::json_or_form::JsonOrForm;
use crate::state::app_state::AppState;

/// Login body. Missing or non-string fields arrive as empty strings and fail
/// validation.
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub username: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub password: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LoginField {
    Text(String),
    Other(IgnoredAny),
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LoginField::deserialize(deserializer)? {
        LoginField::Text(text) => text,
        LoginField::Other(_) => String::new(),
    })
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: Claims,
    pub token: String,
}

/// Claims granted to a user who passed the credential check.
pub fn claims_for(username: &str) -> Claims {
    Claims::new(username)
        .with_scope(GOLD_CODES_READ)
        .with_extra("custom", "any custom data")
}

/// Exchange a username/password pair for a signed access token.
async fn authorize(
    body: JsonOrForm<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let login = body.into_inner();

    if !credentials::validate(&login.username, &login.password) {
        info!("login rejected");
        return Err(AppError::invalid_credentials());
    }

    let claims = claims_for(&login.username);
    let token = mint_access_token(&claims, SystemTime::now(), &app_state.security)?;

    info!(username = %claims.username, "access token issued");

    Ok(HttpResponse::Ok().json(LoginResponse {
        user: claims,
        token,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        super::resource("/authorization").route(web::post().to(authorize)),
    );
}
