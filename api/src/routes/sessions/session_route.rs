//! Session lifecycle: POST /api/sessions, DELETE /api/sessions/{id}.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chat_session::SharedSession;
use uuid::Uuid;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::{AppError, AppResult},
    routes::sessions::session_dto::{SessionClosed, SessionCreated},
};

/// Parses `raw` and looks the session up. Malformed ids are reported as
/// unknown sessions.
pub(crate) async fn find_session(state: &AppState, raw: &str) -> AppResult<(Uuid, SharedSession)> {
    let id = Uuid::parse_str(raw).map_err(|_| AppError::SessionNotFound(raw.to_string()))?;
    let session = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::SessionNotFound(raw.to_string()))?;
    Ok((id, session))
}

pub async fn create_session(State(state): State<AppState>) -> Response {
    let session_id = state.sessions.create().await;
    ApiResponse::success(SessionCreated { session_id })
        .into_response_with_status(StatusCode::CREATED)
}

pub async fn close_session(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> AppResult<impl IntoResponse> {
    let (session_id, _) = find_session(&state, &raw).await?;
    let closed = state.sessions.close(session_id).await;
    Ok(ApiResponse::success(SessionClosed { session_id, closed }))
}
