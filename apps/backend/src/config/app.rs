//! Application configuration loaded from environment variables.
//!
//! Read once at startup. Business logic never touches the environment; it
//! receives `SecurityConfig` through `AppState`.

use std::env;
use std::time::Duration;

use crate::error::AppError;
use crate::state::app_state::{AppState, DEFAULT_MAX_PAYLOAD_SIZE};
use crate::state::security_config::{SecurityConfig, DEFAULT_TOKEN_TTL};

/// Shortest signing secret accepted at startup.
pub const MIN_SECRET_LEN: usize = 32;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

/// Centralized application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server configuration
    pub host: String,
    pub port: u16,

    // Security configuration
    pub security: SecurityConfig,

    // HTTP payload limit
    pub max_payload_size: usize,
}

impl Config {
    /// Load and validate all configuration from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its
    /// value if set.
    pub fn from_vars<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("BACKEND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("BACKEND_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'"))
            })?,
            None => DEFAULT_PORT,
        };

        let jwt_secret = lookup("BACKEND_JWT_SECRET")
            .ok_or_else(|| AppError::config("BACKEND_JWT_SECRET must be set".to_string()))?;
        if jwt_secret.len() < MIN_SECRET_LEN {
            return Err(AppError::config(format!(
                "BACKEND_JWT_SECRET is too short. It should be at least {MIN_SECRET_LEN} characters."
            )));
        }

        let token_ttl = match lookup("BACKEND_TOKEN_TTL_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(AppError::config(format!(
                        "BACKEND_TOKEN_TTL_SECS must be a positive integer, got '{raw}'"
                    )))
                }
            },
            None => DEFAULT_TOKEN_TTL,
        };

        let max_payload_size = match lookup("MAX_JSON_PAYLOAD_SIZE") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(bytes) if bytes > 0 => bytes,
                _ => {
                    return Err(AppError::config(format!(
                        "MAX_JSON_PAYLOAD_SIZE must be a positive integer, got '{raw}'"
                    )))
                }
            },
            None => DEFAULT_MAX_PAYLOAD_SIZE,
        };

        let security = SecurityConfig::try_new(jwt_secret)?.with_token_ttl(token_ttl);

        Ok(Config {
            host,
            port,
            security,
            max_payload_size,
        })
    }

    /// Shared state handed to every worker.
    pub fn app_state(&self) -> AppState {
        AppState::new(self.security.clone()).with_max_payload_size(self.max_payload_size)
    }
}
