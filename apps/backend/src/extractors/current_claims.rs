use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::auth::claims::{Claims, TokenClaims};
use crate::auth::jwt::TokenError;
use crate::error::AppError;

/// Claims of the caller admitted by `JwtExtract`.
///
/// Only meaningful on routes behind the gate. Elsewhere the extractor fails
/// with `MissingToken`.
#[derive(Debug, Clone)]
pub struct CurrentClaims {
    pub claims: Claims,
    /// Issued-at (seconds since epoch)
    pub issued_at: i64,
    /// Expiry (seconds since epoch)
    pub expires_at: i64,
}

impl CurrentClaims {
    /// Fail with `Forbidden` unless the token grants `scope`.
    pub fn require_scope(&self, scope: &str) -> Result<(), AppError> {
        if self.claims.has_scope(scope) {
            Ok(())
        } else {
            Err(AppError::forbidden())
        }
    }
}

impl From<TokenClaims> for CurrentClaims {
    fn from(token: TokenClaims) -> Self {
        Self {
            claims: token.claims,
            issued_at: token.iat,
            expires_at: token.exp,
        }
    }
}

impl FromRequest for CurrentClaims {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req
            .extensions()
            .get::<TokenClaims>()
            .cloned()
            .map(CurrentClaims::from)
            .ok_or(AppError::unauthorized(TokenError::MissingToken));

        ready(claims)
    }
}
