use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Batch pipelines
        .route("/api/reorganize", post(handlers::reorganize))
        .route("/api/translate/batch", post(handlers::translate_batch))
        .route("/api/summarize", post(handlers::summarize))
        .route("/api/qa", post(handlers::qa))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
