//! Bearer-token gate.
//!
//! Wraps only the protected resource. Verifies the `Authorization: Bearer`
//! token against the configured secret, stores the verified `TokenClaims` in
//! request extensions for `CurrentClaims` and records the username on the
//! request span. Any rejection short-circuits with the uniform 401 from
//! `AppError::Unauthorized`; the precise reason is logged, not returned.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::{debug, warn, Span};

use crate::auth::claims::TokenClaims;
use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::extractors::bearer::bearer_token;
use crate::state::app_state::AppState;

pub struct JwtExtract;

impl<S, B> Transform<S, ServiceRequest> for JwtExtract
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtExtractMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtExtractMiddleware { service }))
    }
}

pub struct JwtExtractMiddleware<S> {
    service: S,
}

/// Verify the request's bearer token. Pure; no logging.
fn authorize(req: &ServiceRequest) -> Result<TokenClaims, AppError> {
    let token = bearer_token(req.headers()).map_err(AppError::unauthorized)?;

    let app_state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not available".to_string()))?;

    verify_access_token(token, &app_state.security)
}

impl<S, B> Service<ServiceRequest> for JwtExtractMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authorize(&req) {
            Ok(token_claims) => {
                let username = token_claims.claims.username.clone();

                // Store claims in request extensions BEFORE calling the service
                req.extensions_mut().insert(token_claims);

                let fut = self.service.call(req);
                Box::pin(async move {
                    Span::current().record("username", username.as_str());
                    debug!(username = %username, "bearer token accepted");
                    fut.await.map(ServiceResponse::map_into_left_body)
                })
            }
            // Build the response inside the future so it runs within the
            // request's trace scope.
            Err(err) => Box::pin(async move {
                match &err {
                    AppError::Unauthorized(reason) => {
                        warn!(code = err.code(), reason = %reason, "bearer token rejected");
                    }
                    other => warn!(code = other.code(), "bearer gate failed"),
                }
                let response = err.error_response();
                Ok(req.into_response(response).map_into_right_body())
            }),
        }
    }
}
