use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use tracing::debug;

use crate::auth::claims::{Claims, TokenClaims};
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Reasons a presented bearer token is rejected.
///
/// These stay distinguishable for logging, but all of them render as the same
/// 401 response (see `AppError::Unauthorized`).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("missing bearer token")]
    MissingToken,
    #[error("malformed token")]
    MalformedToken,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
}

impl TokenError {
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::MissingToken => "UNAUTHORIZED_MISSING_BEARER",
            TokenError::MalformedToken => "UNAUTHORIZED_MALFORMED_JWT",
            TokenError::InvalidSignature => "UNAUTHORIZED_INVALID_SIGNATURE",
            TokenError::Expired => "UNAUTHORIZED_EXPIRED_JWT",
        }
    }
}

fn require_secret(security: &SecurityConfig) -> Result<(), AppError> {
    if security.jwt_secret.is_empty() {
        return Err(AppError::config("JWT secret is empty".to_string()));
    }
    Ok(())
}

/// Mint a signed access token carrying `claims`, issued at `now`.
///
/// `exp` is `iat + security.token_ttl`. The same claims minted at the same
/// second always produce the same token.
pub fn mint_access_token(
    claims: &Claims,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    require_secret(security)?;

    if claims.username.trim().is_empty() {
        return Err(AppError::bad_request(
            "Claims must include a username".to_string(),
        ));
    }

    // Tokens carry whole seconds; a sub-second lifetime can't be expressed.
    if security.token_ttl < Duration::from_secs(1) {
        return Err(AppError::config(
            "Token TTL must be at least one second".to_string(),
        ));
    }
    let ttl = i64::try_from(security.token_ttl.as_secs())
        .map_err(|_| AppError::config("Token TTL is out of range".to_string()))?;

    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time".to_string()))?
        .as_secs() as i64;

    let exp = iat
        .checked_add(ttl)
        .ok_or_else(|| AppError::internal("Token expiry overflows".to_string()))?;

    let payload = TokenClaims {
        claims: claims.clone(),
        iat,
        exp,
    };

    debug!(username = %claims.username, exp, "minting access token");

    encode(
        &Header::new(security.algorithm),
        &payload,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a token's signature and expiry and return its payload.
///
/// Rejections come back as `AppError::Unauthorized` carrying the
/// `TokenError` reason. An empty secret is a configuration error, never an
/// "accept everything" verifier.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<TokenClaims, AppError> {
    require_secret(security)?;

    // Pin the algorithm and check exp with no grace period.
    let mut validation = Validation::new(security.algorithm);
    validation.validate_exp = true;
    validation.leeway = 0;

    decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        let reason = match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                TokenError::InvalidSignature
            }
            _ => TokenError::MalformedToken,
        };
        AppError::unauthorized(reason)
    })
}
