//! Test service builder.
//!
//! Wraps an `AppState` in the same middleware stack as `main` and hands back
//! an initialized Actix test service. Production routes are the default;
//! `with_routes` swaps them for a test's own.

use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::web::{self, ServiceConfig};
use actix_web::{App, Error as ActixError};

use codevault::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use codevault::state::AppState;

type RoutesFn = Box<dyn FnOnce(&mut ServiceConfig)>;

pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder {
        state,
        routes: None,
    }
}

pub struct TestAppBuilder {
    state: AppState,
    routes: Option<RoutesFn>,
}

impl TestAppBuilder {
    /// Serve `routes::configure`, the production route table.
    pub fn with_prod_routes(mut self) -> Self {
        self.routes = None;
        self
    }

    /// Serve only the routes registered by `f`.
    pub fn with_routes<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut ServiceConfig) + 'static,
    {
        self.routes = Some(Box::new(f));
        self
    }

    /// Override the JSON/form body limit for this app.
    pub fn with_max_payload_size(mut self, limit: usize) -> Self {
        self.state = self.state.with_max_payload_size(limit);
        self
    }

    pub async fn build(
        self,
    ) -> impl Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = ActixError>
    {
        let routes = self.routes;
        let app = App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(web::Data::new(self.state))
            .configure(move |cfg| match routes {
                Some(f) => f(cfg),
                None => codevault::routes::configure(cfg),
            });

        actix_web::test::init_service(app).await
    }
}
