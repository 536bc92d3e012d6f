//! API Routes
//!
//! Configures the Axum router with all proxy endpoints.

use axum::{middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{fetch_handler, health_handler, root_handler, stats_handler, AppState};
use super::middleware::rate_limit_middleware;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` - Plain-text liveness message
/// - `GET /fetch?url=<absolute-url>` - Proxy a GET to the target URL
/// - `GET /health` - JSON health check
/// - `GET /stats` - Cache and rate limiter statistics
///
/// # Middleware
/// - Rate limit: Every route counts against the shared window
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/fetch", get(fetch_handler))
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
