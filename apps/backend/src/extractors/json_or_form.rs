use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::web::{self, BytesMut};
use actix_web::{FromRequest, HttpRequest};
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::{Error as JsonError, Value};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::state::app_state::{AppState, DEFAULT_MAX_PAYLOAD_SIZE};

/// Body extractor accepting either JSON or `application/x-www-form-urlencoded`.
///
/// A request without a content type is read as a form. An empty body, a JSON
/// value that is not an object, or any other content type carries no fields
/// and yields `T` built from its defaults. Only an oversized body, bytes that
/// are not JSON at all, or a form that cannot be decoded become a 400.
#[derive(Debug)]
pub struct JsonOrForm<T>(pub T);

impl<T> JsonOrForm<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for JsonOrForm<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Unsupported,
}

impl BodyKind {
    fn from_content_type(content_type: &str) -> Self {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        match mime.as_str() {
            "" | "application/x-www-form-urlencoded" => BodyKind::Form,
            "application/json" => BodyKind::Json,
            m if m.ends_with("+json") => BodyKind::Json,
            _ => BodyKind::Unsupported,
        }
    }
}

impl<T> FromRequest for JsonOrForm<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();

        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("")
            .to_string();

        let limit = req
            .app_data::<web::Data<AppState>>()
            .map(|state| state.max_payload_size)
            .unwrap_or(DEFAULT_MAX_PAYLOAD_SIZE);

        Box::pin(async move {
            let kind = BodyKind::from_content_type(&content_type);

            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    warn!(error = %e, "Failed to read request body chunk");
                    AppError::bad_request("Failed to read request body".to_string())
                })?;
                if body.len() + chunk.len() > limit {
                    return Err(AppError::bad_request(format!(
                        "Request body exceeds {limit} bytes"
                    )));
                }
                body.extend_from_slice(&chunk);
            }

            if body.is_empty() {
                return empty_fields::<T>().map(JsonOrForm);
            }

            let parsed = match kind {
                BodyKind::Json => {
                    let value: Value = serde_json::from_slice(&body).map_err(|e| {
                        debug!(body_size = body.len(), "JSON parsing failed");
                        AppError::bad_request(classify_json_error(&e))
                    })?;
                    if value.is_object() {
                        serde_json::from_value::<T>(value)
                            .map_err(|e| AppError::bad_request(classify_json_error(&e)))?
                    } else {
                        debug!("JSON body is not an object; reading no fields");
                        empty_fields::<T>()?
                    }
                }
                BodyKind::Form => {
                    let text = std::str::from_utf8(&body).map_err(|_| {
                        AppError::bad_request("Form body is not valid UTF-8".to_string())
                    })?;
                    web::Query::<T>::from_query(text)
                        .map_err(|e| {
                            debug!(body_size = body.len(), error = %e, "Form parsing failed");
                            AppError::bad_request("Invalid form body".to_string())
                        })?
                        .into_inner()
                }
                BodyKind::Unsupported => {
                    debug!(content_type = %content_type, "Unsupported body type; reading no fields");
                    empty_fields::<T>()?
                }
            };

            Ok(JsonOrForm(parsed))
        })
    }
}

/// `T` as if the request carried no fields at all.
fn empty_fields<T: DeserializeOwned>() -> Result<T, AppError> {
    web::Query::<T>::from_query("")
        .map(web::Query::into_inner)
        .map_err(|_| AppError::bad_request("Request body is missing required fields".to_string()))
}

/// Sanitized message for a serde_json failure; never echoes the body.
fn classify_json_error(error: &JsonError) -> String {
    match error.classify() {
        serde_json::error::Category::Syntax => {
            let line = error.line();
            format!("Invalid JSON at line {line}")
        }
        serde_json::error::Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        serde_json::error::Category::Data => {
            "Invalid JSON: wrong types for one or more fields".to_string()
        }
        serde_json::error::Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    }
}
