/// Configuration for a completion model invocation.
///
/// The API key is carried here explicitly and handed to the client
/// constructor; nothing is read from or written to the process environment
/// at call time.
///
/// # Fields
///
/// - `model`: The model identifier (e.g., `"gpt-4"`).
/// - `endpoint`: Base URL of an OpenAI-compatible API.
/// - `api_key`: Bearer token for the completion service.
/// - `max_tokens`: Maximum number of tokens to generate.
/// - `temperature`: Controls randomness (0.0 = deterministic).
/// - `top_p`: Nucleus sampling cutoff (alternative to temperature).
/// - `timeout_secs`: Optional request timeout; `None` waits indefinitely.
///
/// # Examples
///
/// ```
/// use ai_llm_service::LlmModelConfig;
///
/// let cfg = LlmModelConfig {
///     model: "gpt-4".to_string(),
///     endpoint: "https://api.openai.com".to_string(),
///     api_key: "sk-...".to_string(),
///     max_tokens: Some(3000),
///     temperature: Some(0.1),
///     top_p: None,
///     timeout_secs: None,
/// };
/// assert_eq!(cfg.model, "gpt-4");
/// ```
#[derive(Clone, PartialEq)]
pub struct LlmModelConfig {
    /// Model identifier string (e.g., `"gpt-4"`).
    pub model: String,

    /// Base URL of the API (without the `/v1/...` path).
    pub endpoint: String,

    /// API key for bearer authentication.
    pub api_key: String,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

impl std::fmt::Debug for LlmModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmModelConfig")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
