use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chat_session::SessionError;
use thiserror::Error;

use crate::core::http::response_envelope::ApiResponse;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- IO / server ---
    #[error("failed to bind listener on {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("question must not be empty")]
    EmptyQuestion,

    #[error("session {0} not found")]
    SessionNotFound(String),

    #[error("no example question with index {0}")]
    ExampleNotFound(usize),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::EmptyQuestion => StatusCode::BAD_REQUEST,
            AppError::SessionNotFound(_) | AppError::ExampleNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Bind { .. } | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Bind { .. } => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::EmptyQuestion => "EMPTY_QUESTION",
            AppError::SessionNotFound(_) => "SESSION_NOT_FOUND",
            AppError::ExampleNotFound(_) => "EXAMPLE_NOT_FOUND",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        ApiResponse::<()>::error(self.error_code(), self.to_string(), Vec::new())
            .into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::UnknownExample(index) => AppError::ExampleNotFound(index),
        }
    }
}
