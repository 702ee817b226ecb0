use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::DashboardState;

/// Create the HTTP router with all routes
pub fn create_router(state: DashboardState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Session status and hotkey switch
        .route("/api/status", get(handlers::get_status))
        .route("/api/hotkeys/toggle", post(handlers::toggle_hotkeys))
        // Transcription history
        .route("/api/transcriptions", get(handlers::list_transcriptions))
        .route(
            "/api/transcriptions/clear",
            post(handlers::clear_transcriptions),
        )
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
