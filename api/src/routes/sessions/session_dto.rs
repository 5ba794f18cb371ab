use chat_session::Turn;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct SessionClosed {
    pub session_id: Uuid,
    pub closed: bool,
}

/// Full transcript plus the message counter.
#[derive(Debug, Serialize)]
pub struct TranscriptView {
    pub session_id: Uuid,
    pub turns: Vec<Turn>,
    pub count: usize,
}
