//! HTTP shell around the question-answering session layer.
//!
//! Handlers only sequence calls: look up the session, submit, render. All
//! answering logic lives in `chat-session` and `contextor`.

use std::env;
use std::sync::Arc;
use std::time::Duration;

pub mod core {
    pub mod app_state;
    pub mod http {
        pub mod response_envelope;
    }
}
pub mod error_handler;
mod middleware_layer {
    pub mod json_extractor;
}
mod routes {
    pub mod page_route;
    pub mod ask {
        pub mod ask_question_route;
        pub mod ask_request;
    }
    pub mod examples {
        pub mod example_route;
    }
    pub mod sessions {
        pub mod session_dto;
        pub mod session_route;
    }
    pub mod status {
        pub mod status_response;
        pub mod status_route;
    }
    pub mod transcript {
        pub mod transcript_route;
    }
}

use axum::{
    Router,
    middleware,
    routing::{delete, get, post},
};
use chat_session::SessionRegistry;
use contextor::Orchestrator;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use crate::core::app_state::{AppState, StatusSource};
pub use crate::error_handler::{AppError, AppResult};

use crate::middleware_layer::json_extractor::json_error_mapper;
use crate::routes::{
    ask::ask_question_route::ask_question,
    examples::example_route::{ask_example, list_examples},
    page_route::index_page,
    sessions::session_route::{close_session, create_session},
    status::status_route::status,
    transcript::transcript_route::{clear_transcript, get_transcript},
};

/// Default bind address when `API_ADDRESS` is unset.
pub const DEFAULT_API_ADDRESS: &str = "127.0.0.1:8501";

/// How often abandoned sessions are swept.
pub const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Builds the full router. Used by [`start`] and by tests.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/api/status", get(status))
        .route("/api/examples", get(list_examples))
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/{id}", delete(close_session))
        .route(
            "/api/sessions/{id}/transcript",
            get(get_transcript).delete(clear_transcript),
        )
        .route("/api/sessions/{id}/ask", post(ask_question))
        .route("/api/sessions/{id}/examples/{index}", post(ask_example))
        .layer(middleware::from_fn(json_error_mapper))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the UI until Ctrl+C.
pub async fn start(orchestrator: Orchestrator) -> Result<(), AppError> {
    let addr = env::var("API_ADDRESS").unwrap_or_else(|_| DEFAULT_API_ADDRESS.to_string());
    let state = AppState::from_orchestrator(orchestrator);
    let sessions = state.sessions.clone();
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| AppError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!(%addr, "listening");
    let sweeper = tokio::spawn(sweep_sessions(sessions, SESSION_SWEEP_INTERVAL));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    sweeper.abort();
    info!("server stopped");
    Ok(())
}

/// Expires idle sessions every `period`. Runs until aborted.
pub async fn sweep_sessions(sessions: Arc<SessionRegistry>, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.tick().await;
    loop {
        ticker.tick().await;
        sessions.expire_idle().await;
    }
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
