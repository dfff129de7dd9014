use std::time::Duration;

use jsonwebtoken::Algorithm;

use crate::error::AppError;

/// Access tokens live for two days unless configured otherwise.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(2 * 24 * 60 * 60);

/// Configuration for JWT security settings
#[derive(Clone)]
pub struct SecurityConfig {
    /// JWT secret key for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// JWT algorithm to use (defaults to HS256)
    pub algorithm: Algorithm,
    /// Lifetime of freshly minted access tokens
    pub token_ttl: Duration,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given JWT secret
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    /// Like `new`, but refuses an empty secret.
    pub fn try_new(jwt_secret: impl Into<Vec<u8>>) -> Result<Self, AppError> {
        let config = Self::new(jwt_secret);
        if config.jwt_secret.is_empty() {
            return Err(AppError::config("JWT secret must not be empty".to_string()));
        }
        Ok(config)
    }

    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    /// Random 32-byte secret for tests that don't care about the value.
    pub fn for_tests() -> Self {
        use rand::RngCore;

        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self::new(secret)
    }
}

// Keep the secret out of logs.
impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}
