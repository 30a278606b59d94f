//! Router configuration for the HTTP API.
//!
//! This module sets up all routes and middleware (CORS, body limit, tracing),
//! and creates the axum router ready for serving.

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;
use crate::config::ServerConfig;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    // Permissive CORS; the browser front-end is served from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let entities = Router::new()
        .route(
            "/entities",
            get(handlers::list_models).post(handlers::create_model),
        )
        .route(
            "/entities/{id}",
            get(handlers::get_model)
                .put(handlers::update_model)
                .delete(handlers::delete_model),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/alive", get(handlers::alive))
        .merge(entities)
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
