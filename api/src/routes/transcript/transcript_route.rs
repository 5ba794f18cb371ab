//! GET/DELETE /api/sessions/{id}/transcript

use axum::extract::{Path, State};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
    routes::sessions::{session_dto::TranscriptView, session_route::find_session},
};

pub async fn get_transcript(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> AppResult<ApiResponse<TranscriptView>> {
    let (session_id, session) = find_session(&state, &raw).await?;
    let session = session.lock().await;
    let turns = session.transcript().all().to_vec();
    Ok(ApiResponse::success(TranscriptView {
        session_id,
        count: turns.len(),
        turns,
    }))
}

/// Reset button. Clearing an empty transcript is fine.
pub async fn clear_transcript(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> AppResult<ApiResponse<TranscriptView>> {
    let (session_id, session) = find_session(&state, &raw).await?;
    session.lock().await.reset();
    Ok(ApiResponse::success(TranscriptView {
        session_id,
        turns: Vec::new(),
        count: 0,
    }))
}
