//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter; `api_router` mounts them
//! under `/api/v1` behind the shared auth middleware.

pub mod checkout;
pub mod extract;
pub mod middleware;
pub mod progress;

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub use checkout::{checkout_router, CheckoutAppState};
pub use extract::ApiJson;
pub use middleware::{auth_middleware, AuthState};
pub use progress::{progress_router, ProgressAppState};

/// Everything the API needs to serve requests.
#[derive(Clone)]
pub struct ApiState {
    pub checkout: CheckoutAppState,
    pub progress: ProgressAppState,
    pub auth: AuthState,
}

/// Cross-cutting HTTP settings.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub cors_origins: Vec<HeaderValue>,
    pub request_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Builds the complete application router.
///
/// # Routes
/// - `GET /health` - liveness probe, no auth
/// - `/api/v1/payment/*` - see [`checkout`]
/// - `/api/v1/course/*` - see [`progress`]
pub fn api_router(state: ApiState, settings: &HttpSettings) -> Router {
    let api = Router::new()
        .merge(checkout_router().with_state(state.checkout))
        .merge(progress_router().with_state(state.progress))
        .layer(axum::middleware::from_fn_with_state(
            state.auth,
            auth_middleware,
        ));

    let cors = CorsLayer::new()
        .allow_origin(settings.cors_origins.clone())
        .allow_methods(AllowMethods::list([Method::GET, Method::POST, Method::OPTIONS]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api)
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn health() -> &'static str {
    "ok"
}
