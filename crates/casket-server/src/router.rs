use axum::extract::DefaultBodyLimit;
use axum::{routing::get, Router};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handler;
use crate::state::AppState;

/// Build the axum router with all Casket endpoints.
///
/// Anything that is not a `/v1` endpoint falls through to the object
/// handler, which owns method dispatch and path parsing for `/data/...`.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let router = Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .fallback(handler::object_handler)
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.max_object_size));

    let router = match config.request_timeout() {
        Some(timeout) => router.layer(TimeoutLayer::new(timeout)),
        None => router,
    };
    router.layer(TraceLayer::new_for_http())
}
