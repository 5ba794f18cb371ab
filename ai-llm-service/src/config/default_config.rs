//! Default completion config, built from an explicit API key plus env overrides.
//!
//! # Environment variables
//!
//! - `OPENAI_BASE_URL` = API base (default `https://api.openai.com`)
//! - `OPENAI_MODEL`    = model id (default `gpt-4`)
//! - `LLM_MAX_TOKENS`  = optional max tokens (u32, default 3000)
//!
//! The key itself never comes from here: it is resolved by the secret store
//! and passed in by the caller.

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{
        AiLlmError, ConfigError, env_opt_u32, validate_http_endpoint, validate_range_f32,
    },
};

/// Default OpenAI API base.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
/// Default completion model.
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-4";
/// Low sampling temperature for precise, reproducible answers.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;
/// Output budget large enough for the long structured answers.
pub const DEFAULT_MAX_TOKENS: u32 = 3000;

/// Constructs the config for the answer-synthesis model.
///
/// # Defaults
/// - `temperature = Some(0.1)`
/// - `max_tokens = Some(3000)`
/// - `timeout_secs = None` (no timeout on the remote call)
///
/// # Errors
/// - [`ConfigError::EmptyApiKey`] if `api_key` is blank
/// - [`ConfigError::EmptyModel`] if `OPENAI_MODEL` is set but blank
/// - [`ConfigError::InvalidFormat`] if `OPENAI_BASE_URL` is not http(s)
/// - [`ConfigError::InvalidNumber`] if `LLM_MAX_TOKENS` is not a u32
pub fn config_openai_completion(api_key: &str) -> Result<LlmModelConfig, AiLlmError> {
    if api_key.trim().is_empty() {
        return Err(ConfigError::EmptyApiKey.into());
    }

    let endpoint =
        std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string());
    validate_http_endpoint("OPENAI_BASE_URL", &endpoint)?;

    let model =
        std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_COMPLETION_MODEL.to_string());
    if model.trim().is_empty() {
        return Err(ConfigError::EmptyModel.into());
    }

    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?.unwrap_or(DEFAULT_MAX_TOKENS);

    validate_range_f32("temperature", DEFAULT_TEMPERATURE, 0.0, 2.0)?;

    Ok(LlmModelConfig {
        model,
        endpoint,
        api_key: api_key.to_string(),
        max_tokens: Some(max_tokens),
        temperature: Some(DEFAULT_TEMPERATURE),
        top_p: None,
        timeout_secs: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_is_rejected() {
        let err = config_openai_completion("  ").unwrap_err();
        assert!(matches!(err, AiLlmError::Config(ConfigError::EmptyApiKey)));
    }

    #[test]
    fn defaults_are_applied() {
        // Only meaningful when the overrides are not set in the test environment.
        if std::env::var("OPENAI_MODEL").is_ok() || std::env::var("LLM_MAX_TOKENS").is_ok() {
            return;
        }
        let cfg = config_openai_completion("sk-test").unwrap();
        assert_eq!(cfg.model, DEFAULT_COMPLETION_MODEL);
        assert_eq!(cfg.max_tokens, Some(DEFAULT_MAX_TOKENS));
        assert_eq!(cfg.temperature, Some(DEFAULT_TEMPERATURE));
        assert_eq!(cfg.timeout_secs, None);
        assert_eq!(cfg.api_key, "sk-test");
    }
}
