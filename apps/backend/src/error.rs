use actix_web::error::ResponseError;
use actix_web::http::{header, StatusCode};
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::auth::jwt::TokenError;
use crate::trace_ctx;

/// Body sent back to clients as the login failure response.
pub const INVALID_CREDENTIALS_BODY: &str = "UnauthorizedError";

/// Message shared by every bearer-token rejection.
pub const UNAUTHORIZED_MESSAGE: &str =
    "You need an authorization token to view confidential information.";

/// JSON error body: `{status, message}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Unauthorized: {0}")]
    Unauthorized(TokenError),
    #[error("Forbidden")]
    Forbidden,
    #[error("Bad request: {detail}")]
    BadRequest { detail: String },
    #[error("Not found: {detail}")]
    NotFound { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    /// Error code used in logs.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::Unauthorized(reason) => reason.code(),
            AppError::Forbidden => "FORBIDDEN",
            AppError::BadRequest { .. } => "BAD_REQUEST",
            AppError::NotFound { .. } => "NOT_FOUND",
            AppError::Config { .. } => "CONFIG_ERROR",
            AppError::Internal { .. } => "INTERNAL",
        }
    }

    /// Client-facing message. Token rejection reasons and internal details
    /// never leave the process.
    fn message(&self) -> String {
        match self {
            AppError::InvalidCredentials => INVALID_CREDENTIALS_BODY.to_string(),
            AppError::Unauthorized(_) => UNAUTHORIZED_MESSAGE.to_string(),
            AppError::Forbidden => "Forbidden".to_string(),
            AppError::BadRequest { detail } => detail.clone(),
            AppError::NotFound { .. } => "Not Found".to_string(),
            AppError::Config { .. } | AppError::Internal { .. } => "Server Error".to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials
    }

    pub fn unauthorized(reason: TokenError) -> Self {
        Self::Unauthorized(reason)
    }

    pub fn forbidden() -> Self {
        Self::Forbidden
    }

    pub fn bad_request(detail: String) -> Self {
        Self::BadRequest { detail }
    }

    pub fn not_found(detail: String) -> Self {
        Self::NotFound { detail }
    }

    pub fn config(detail: String) -> Self {
        Self::Config { detail }
    }

    pub fn internal(detail: String) -> Self {
        Self::Internal { detail }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let trace_id = trace_ctx::trace_id();

        if status.is_server_error() {
            error!(trace_id = %trace_id, code = self.code(), error = %self, "request failed");
        }

        let mut builder = HttpResponse::build(status);
        builder.insert_header(("x-trace-id", trace_id));

        match self {
            AppError::InvalidCredentials => builder
                .content_type("text/plain; charset=utf-8")
                .body(INVALID_CREDENTIALS_BODY),
            _ => {
                if status == StatusCode::UNAUTHORIZED {
                    builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
                }
                builder.json(ErrorBody {
                    status: status.as_u16(),
                    message: self.message(),
                })
            }
        }
    }
}
