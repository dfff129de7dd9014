//! Per-request tracing span.
//!
//! Opens a span named "request" carrying `trace_id`, `method` and `path`,
//! plus an empty `username` that `JwtExtract` fills in once a token is
//! accepted. Events emitted by the gate and the handlers inherit all of it.
//!
//! Reads the [`TraceId`] stored by `RequestTrace`, so `RequestTrace` must be
//! the outer of the two:
//!
//! App::new()
//!     .wrap(StructuredLogger)
//!     .wrap(TraceSpan)
//!     .wrap(RequestTrace)

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::{field, info_span, Instrument};

use crate::middleware::request_trace::TraceId;
use crate::trace_ctx::UNKNOWN_TRACE_ID;

#[derive(Clone, Default)]
pub struct TraceSpan;

impl<S, B> Transform<S, ServiceRequest> for TraceSpan
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceSpanMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceSpanMiddleware { service }))
    }
}

pub struct TraceSpanMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceSpanMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let span = {
            let extensions = req.extensions();
            let trace_id = extensions
                .get::<TraceId>()
                .map(TraceId::as_str)
                .unwrap_or(UNKNOWN_TRACE_ID);

            info_span!(
                "request",
                trace_id = %trace_id,
                method = %req.method(),
                path = %req.path(),
                username = field::Empty,
            )
        };

        Box::pin(self.service.call(req).instrument(span))
    }
}
