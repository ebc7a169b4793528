use super::handlers;
use super::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Upload pipeline; uploads are not size-capped
        .route(
            "/upload",
            post(handlers::upload_audio).layer(DefaultBodyLimit::disable()),
        )
        // Meeting queries
        .route("/list", get(handlers::list_meetings))
        .route("/summary/:meeting_id", get(handlers::get_summary))
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
