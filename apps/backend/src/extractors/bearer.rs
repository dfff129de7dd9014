use actix_web::http::header::{self, HeaderMap};

use crate::auth::jwt::TokenError;

/// Pull the token out of an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively and exactly one token must
/// follow it. A missing header, or a bare `Bearer` with nothing after it,
/// is `MissingToken`; anything else that doesn't fit is `MalformedToken`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, TokenError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(TokenError::MissingToken)?;

    let value = value.to_str().map_err(|_| TokenError::MalformedToken)?;

    let parts: Vec<&str> = value.split_whitespace().collect();
    match parts.as_slice() {
        [] => Err(TokenError::MissingToken),
        [scheme] if scheme.eq_ignore_ascii_case("bearer") => Err(TokenError::MissingToken),
        [scheme, token] if scheme.eq_ignore_ascii_case("bearer") => Ok(*token),
        _ => Err(TokenError::MalformedToken),
    }
}
