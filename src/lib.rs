pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod controllers;
pub mod middleware;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        Self { config }
    }
}

/// Главный роутер приложения.
pub fn app(state: Arc<AppState>) -> Router {
    let body_limit = state.config.upload.max_upload_bytes;
    let cors = middleware::cors_layer(&state.config.cors);

    Router::new()
        .route("/", get(|| async { "Boarding Sequence API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        // Mount the routes from the controllers module
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
