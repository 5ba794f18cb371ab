use async_trait::async_trait;

use crate::error_handler::AiLlmError;

/// A hosted model that turns a fully assembled prompt into text.
///
/// Implemented by [`crate::OpenAiService`]; tests provide scripted fakes.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Single non-streaming completion. An empty string means the model
    /// produced no text.
    async fn complete(&self, prompt: &str) -> Result<String, AiLlmError>;

    /// Model identifier, for logs and the status panel.
    fn model_name(&self) -> &str;
}
