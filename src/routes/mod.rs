// src/routes/mod.rs
pub mod chat;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use chat::{chat_handler, models_handler, status_handler};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/api/models", get(models_handler))
        .route("/api/status", get(status_handler))
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
}

/// The full application: API routes, the static page, and open CORS.
pub fn build_app(state: SharedState, static_dir: &str) -> Router {
    create_router()
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
        .layer(CorsLayer::very_permissive())
}
