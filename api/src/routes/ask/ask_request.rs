use chat_session::Turn;
use serde::{Deserialize, Serialize};

/// Request payload for /api/sessions/{id}/ask.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// Natural language question, sent verbatim.
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    /// The assistant turn just appended.
    pub answer: Turn,
    /// Messages in the transcript after the exchange.
    pub count: usize,
}
