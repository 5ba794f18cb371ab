//! OpenAI (ChatGPT) service for answer synthesis.
//!
//! Minimal, non-streaming client around the OpenAI REST API. The endpoint is
//! derived from `LlmModelConfig::endpoint`:
//! - POST {endpoint}/v1/chat/completions — chat completion (non-streaming)
//!
//! Constructor validation:
//! - `cfg.api_key` must be non-blank
//! - `cfg.endpoint` must start with http:// or https://
//!
//! Errors are normalized via unified error types in `error_handler`.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::{
    completion::CompletionModel,
    config::llm_model_config::LlmModelConfig,
    error_handler::{
        AiLlmError, ConfigError, HttpError, Provider, ProviderError, ProviderErrorKind,
        make_snippet,
    },
};

/// Thin client for the OpenAI chat completions API.
///
/// Constructed from a complete [`LlmModelConfig`]. Internally keeps a
/// preconfigured `reqwest::Client` with the bearer header installed, so the
/// key is bound to this instance rather than to process state.
#[derive(Debug)]
pub struct OpenAiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_chat: String,
}

impl OpenAiService {
    /// Creates a new [`OpenAiService`] from the given config.
    ///
    /// # Errors
    /// - [`ConfigError::EmptyApiKey`] if `cfg.api_key` is blank
    /// - [`AiLlmError::Provider`] with `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        if cfg.api_key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey.into());
        }

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::new(
                Provider::OpenAI,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", cfg.api_key)).map_err(|e| {
                ProviderError::new(
                    Provider::OpenAI,
                    ProviderErrorKind::Decode(format!("invalid API key header: {e}")),
                )
            })?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        // No timeout unless explicitly configured.
        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = cfg.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_chat = format!("{}/v1/chat/completions", base);

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            temperature = ?cfg.temperature,
            max_tokens = ?cfg.max_tokens,
            "OpenAiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_chat,
        })
    }

    /// Model config this client was built from.
    pub fn config(&self) -> &LlmModelConfig {
        &self.cfg
    }

    /// Performs a **non-streaming** chat completion request (`/v1/chat/completions`).
    ///
    /// The request carries a single user message with `prompt`; all
    /// instructions live in the prompt template.
    ///
    /// A choice whose `content` is `null` yields an empty string; deciding what
    /// to show in that case is the caller's business.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `HttpStatus` for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] for client/network failures
    /// - [`AiLlmError::Provider`] with `Decode` if the JSON cannot be parsed
    /// - [`AiLlmError::Provider`] with `EmptyChoices` if no choices are returned
    pub async fn generate(&self, prompt: &str) -> Result<String, AiLlmError> {
        let started = Instant::now();
        let body = ChatCompletionRequest::from_cfg(&self.cfg, prompt);

        debug!(
            model = %self.cfg.model,
            prompt_len = prompt.len(),
            "POST {}", self.url_chat
        );

        let resp = self.client.post(&self.url_chat).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_chat.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "OpenAI /v1/chat/completions returned non-success status"
            );

            return Err(ProviderError::new(
                Provider::OpenAI,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url,
                    snippet,
                }),
            )
            .into());
        }

        let out: ChatCompletionResponse = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                error!(
                    error = %e,
                    model = %self.cfg.model,
                    latency_ms = started.elapsed().as_millis(),
                    "failed to decode /v1/chat/completions response"
                );
                return Err(ProviderError::new(
                    Provider::OpenAI,
                    ProviderErrorKind::Decode(format!(
                        "serde error: {e}; expected `choices[0].message.content`"
                    )),
                )
                .into());
            }
        };

        let first = out
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::new(Provider::OpenAI, ProviderErrorKind::EmptyChoices))?;

        let content = match first.message.content {
            Some(c) => c,
            None => {
                warn!(model = %self.cfg.model, "completion returned null content");
                String::new()
            }
        };

        info!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            answer_len = content.len(),
            "chat completion completed"
        );

        Ok(content)
    }
}

#[async_trait]
impl CompletionModel for OpenAiService {
    async fn complete(&self, prompt: &str) -> Result<String, AiLlmError> {
        self.generate(prompt).await
    }

    fn model_name(&self) -> &str {
        &self.cfg.model
    }
}

/* ===========================================================================
HTTP payloads & options
======================================================================== */

/// Minimal request body for `/v1/chat/completions` (non-streaming).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl<'a> ChatCompletionRequest<'a> {
    /// Builds a single-message chat request from config and `prompt`.
    fn from_cfg(cfg: &'a LlmModelConfig, prompt: &'a str) -> Self {
        Self {
            model: &cfg.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
            temperature: cfg.temperature,
            top_p: cfg.top_p,
            max_tokens: cfg.max_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Minimal response for `/v1/chat/completions`.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageOut,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::post};
    use serde_json::{Value, json};

    fn cfg(endpoint: &str) -> LlmModelConfig {
        LlmModelConfig {
            model: "gpt-4".into(),
            endpoint: endpoint.into(),
            api_key: "sk-test".into(),
            max_tokens: Some(3000),
            temperature: Some(0.1),
            top_p: None,
            timeout_secs: None,
        }
    }

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let err = OpenAiService::new(cfg("ftp://example")).unwrap_err();
        assert!(matches!(err, AiLlmError::Provider(_)));
    }

    #[test]
    fn request_body_is_non_streaming_with_sampling_params() {
        let c = cfg("http://localhost");
        let body = serde_json::to_value(ChatCompletionRequest::from_cfg(&c, "hi")).unwrap();
        assert_eq!(body["stream"], json!(false));
        assert_eq!(body["max_tokens"], json!(3000));
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["messages"][0], json!({"role": "user", "content": "hi"}));
        assert!(body.get("top_p").is_none());
    }

    #[tokio::test]
    async fn generate_returns_first_choice_and_sends_bearer() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|headers: axum::http::HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["authorization"], "Bearer sk-test");
                assert_eq!(body["model"], "gpt-4");
                Json(json!({"choices": [{"message": {"content": "answer"}}]}))
            }),
        );
        let base = serve(app).await;
        let svc = OpenAiService::new(cfg(&base)).unwrap();
        assert_eq!(svc.complete("question").await.unwrap(), "answer");
    }

    #[tokio::test]
    async fn null_content_is_empty_string() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({"choices": [{"message": {"content": null}}]})) }),
        );
        let base = serve(app).await;
        let svc = OpenAiService::new(cfg(&base)).unwrap();
        assert_eq!(svc.generate("q").await.unwrap(), "");
    }

    #[tokio::test]
    async fn non_success_status_maps_to_provider_error() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::UNAUTHORIZED, "invalid api key") }),
        );
        let base = serve(app).await;
        let svc = OpenAiService::new(cfg(&base)).unwrap();
        let err = svc.generate("q").await.unwrap_err();
        match err {
            AiLlmError::Provider(ProviderError {
                kind: ProviderErrorKind::HttpStatus(h),
                ..
            }) => {
                assert_eq!(h.status, StatusCode::UNAUTHORIZED);
                assert_eq!(h.snippet, "invalid api key");
            }
            other => panic!("unexpected: {other}"),
        }
    }
}
