use cloud_index::RetrievedNode;
use serde::Serialize;

/// What the chat layer receives for every question, success or not.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QueryResult {
    /// Answer text or a human-readable diagnostic. Never empty.
    pub response: String,
    /// Supporting passages. Currently always empty: citations are not shown.
    pub sources: Vec<RetrievedNode>,
}

impl QueryResult {
    pub(crate) fn text(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            sources: Vec::new(),
        }
    }
}

/// Read-only parameter summary for the status panel.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EngineSettings {
    pub similarity_top_k: usize,
    pub response_mode: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub target_language: String,
    pub sources_visible: bool,
}
