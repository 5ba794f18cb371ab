//! GET /api/examples and POST /api/sessions/{id}/examples/{index}

use axum::extract::{Path, State};
use chat_session::EXAMPLE_QUESTIONS;
use serde::Serialize;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
    routes::{ask::ask_request::AskResponse, sessions::session_route::find_session},
};

#[derive(Debug, Serialize)]
pub struct ExampleItem {
    pub index: usize,
    pub question: &'static str,
}

pub async fn list_examples() -> ApiResponse<Vec<ExampleItem>> {
    ApiResponse::success(
        EXAMPLE_QUESTIONS
            .iter()
            .enumerate()
            .map(|(index, &question)| ExampleItem { index, question })
            .collect(),
    )
}

/// Runs the same sequence as a typed question.
pub async fn ask_example(
    State(state): State<AppState>,
    Path((raw, index)): Path<(String, usize)>,
) -> AppResult<ApiResponse<AskResponse>> {
    let (_, session) = find_session(&state, &raw).await?;
    let mut session = session.lock().await;
    let answer = session
        .submit_example(index, state.answerer.as_ref())
        .await?;

    Ok(ApiResponse::success(AskResponse {
        answer,
        count: session.transcript().len(),
    }))
}
