//! GET /api/status — sidebar indicators and parameter summary.

use axum::extract::State;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    routes::status::status_response::StatusResponse,
};

pub async fn status(State(state): State<AppState>) -> ApiResponse<StatusResponse> {
    ApiResponse::success(StatusResponse {
        credentials_loaded: true,
        index_ready: state.status.index_ready().await,
        last_index_error: state.status.last_index_error().await,
        settings: state.status.settings(),
        live_sessions: state.sessions.len().await,
    })
}
