//! Completion service for answer synthesis.
//!
//! - [`OpenAiService`]: non-streaming chat completions against an
//!   OpenAI-compatible API, with the key injected through [`LlmModelConfig`].
//! - [`CompletionModel`]: the seam the query engine talks to.
//! - [`telemetry`]: the shared `tracing` formatting layer used by the binary.

pub mod completion;
pub mod config {
    pub mod default_config;
    pub mod llm_model_config;
}
pub mod error_handler;
pub mod services {
    pub mod open_ai_service;
}
pub mod telemetry;

pub use completion::CompletionModel;
pub use config::default_config::config_openai_completion;
pub use config::llm_model_config::LlmModelConfig;
pub use error_handler::AiLlmError;
pub use services::open_ai_service::OpenAiService;
