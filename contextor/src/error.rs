//! Typed error for the contextor crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextorError {
    /// Required secrets were not supplied.
    #[error(transparent)]
    Secrets(#[from] secret_store::SecretError),

    /// Errors from the hosted retrieval index.
    #[error("index error: {0}")]
    Index(#[from] cloud_index::IndexError),

    /// Errors from the completion service.
    #[error("completion error: {0}")]
    Llm(#[from] ai_llm_service::AiLlmError),

    /// Invalid engine parameters or prompt template.
    #[error("config error: {0}")]
    Config(String),

    /// Tree summarisation did not converge to a single answer.
    #[error("summarization error: {0}")]
    Summarize(String),
}

impl ContextorError {
    /// Short class name shown to the user next to the message.
    pub fn kind(&self) -> &'static str {
        match self {
            ContextorError::Secrets(_) => "SecretError",
            ContextorError::Index(_) => "IndexError",
            ContextorError::Llm(_) => "CompletionError",
            ContextorError::Config(_) => "ConfigError",
            ContextorError::Summarize(_) => "SummarizeError",
        }
    }
}
