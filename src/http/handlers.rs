use axum::{extract::State, response::Json};
use serde::Serialize;
use tracing::info;

use crate::domain::session::{SessionStatus, TranscriptionRecord};

use super::state::DashboardState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: SessionStatus,
    pub hotkeys_enabled: bool,
    pub transcription_count: usize,
    pub last_error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HotkeysResponse {
    pub enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub cleared: bool,
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /api/status
pub async fn get_status(State(state): State<DashboardState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: state.status(),
        hotkeys_enabled: state.hotkeys.is_enabled(),
        transcription_count: state.records().len(),
        last_error: state.last_error(),
    })
}

/// GET /api/transcriptions
pub async fn list_transcriptions(
    State(state): State<DashboardState>,
) -> Json<Vec<TranscriptionRecord>> {
    Json(state.records())
}

/// POST /api/hotkeys/toggle
pub async fn toggle_hotkeys(State(state): State<DashboardState>) -> Json<HotkeysResponse> {
    let enabled = state.hotkeys.toggle();
    info!("hotkeys {}", if enabled { "enabled" } else { "disabled" });
    Json(HotkeysResponse { enabled })
}

/// POST /api/transcriptions/clear
pub async fn clear_transcriptions(State(state): State<DashboardState>) -> Json<ClearResponse> {
    state.clear_history();
    info!("transcription history cleared");
    Json(ClearResponse { cleared: true })
}
