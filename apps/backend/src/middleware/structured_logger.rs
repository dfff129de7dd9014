//! Access log: one `request_completed` event per request, levelled by status
//! class.
//!
//! Records whether an `Authorization` header was sent, never its value, and
//! the username only when the gate admitted the caller.

use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::{header, Method, StatusCode};
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::{error, info, warn};

use crate::auth::claims::TokenClaims;
use crate::middleware::request_trace::TraceId;
use crate::trace_ctx::UNKNOWN_TRACE_ID;

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

/// What the access log knows about a request before it is served.
struct AccessRecord {
    started: Instant,
    method: Method,
    path: String,
    trace_id: String,
    auth_present: bool,
}

impl AccessRecord {
    fn capture(req: &ServiceRequest) -> Self {
        Self {
            started: Instant::now(),
            method: req.method().clone(),
            path: req.path().to_string(),
            trace_id: req
                .extensions()
                .get::<TraceId>()
                .map(TraceId::to_string)
                .unwrap_or_else(|| UNKNOWN_TRACE_ID.to_string()),
            auth_present: req.headers().contains_key(header::AUTHORIZATION),
        }
    }

    fn emit(&self, status: StatusCode, username: Option<&str>) {
        let duration_us = self.started.elapsed().as_micros() as u64;
        let status_code = status.as_u16();
        let user = username.unwrap_or("-");

        macro_rules! completed {
            ($level:ident) => {
                $level!(
                    http.method = %self.method,
                    url.path = %self.path,
                    http.status_code = status_code,
                    duration_us,
                    trace_id = %self.trace_id,
                    auth.present = self.auth_present,
                    user = %user,
                    message = "request_completed"
                )
            };
        }

        if status.is_server_error() {
            completed!(error);
        } else if status.is_client_error() {
            completed!(warn);
        } else {
            completed!(info);
        }
    }
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let record = AccessRecord::capture(&req);
        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            match &result {
                Ok(res) => {
                    let extensions = res.request().extensions();
                    let username = extensions
                        .get::<TokenClaims>()
                        .map(|t| t.claims.username.as_str());
                    record.emit(res.status(), username);
                }
                Err(err) => record.emit(err.as_response_error().status_code(), None),
            }

            result
        })
    }
}
