//! POST /api/sessions/{id}/ask — submits a question in a session.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::{AppError, AppResult},
    routes::{
        ask::ask_request::{AskRequest, AskResponse},
        sessions::session_route::find_session,
    },
};

/// Handler: POST /api/sessions/{id}/ask
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8501/api/sessions/$ID/ask \
///   -H 'content-type: application/json' \
///   -d '{"question":"What is an equal-weight strategy?"}'
/// ```
pub async fn ask_question(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    Json(body): Json<AskRequest>,
) -> AppResult<ApiResponse<AskResponse>> {
    if body.question.trim().is_empty() {
        return Err(AppError::EmptyQuestion);
    }
    let (_, session) = find_session(&state, &raw).await?;

    // Held across the query: one question in flight per session.
    let mut session = session.lock().await;
    let answer = session.submit(&body.question, state.answerer.as_ref()).await;

    Ok(ApiResponse::success(AskResponse {
        answer,
        count: session.transcript().len(),
    }))
}
