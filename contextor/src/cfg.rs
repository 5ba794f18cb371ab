//! Fixed query-engine parameters.

use std::fmt;
use std::num::NonZeroUsize;

use crate::error::ContextorError;
use crate::prompt::PromptTemplate;

/// Passages requested from the index per question.
pub const DEFAULT_SIMILARITY_TOP_K: usize = 30;
/// Context window of the completion model, in tokens.
pub const DEFAULT_CONTEXT_WINDOW: usize = 8192;
/// Tokens reserved for the model's answer.
pub const DEFAULT_NUM_OUTPUT: usize = 3000;
/// Rough chars-per-token ratio used to size context chunks.
pub const CHARS_PER_TOKEN: usize = 4;
/// Smallest chunk the packer will produce, whatever the template size.
pub const MIN_CHUNK_CHARS: usize = 512;

/// How retrieved passages are merged into one answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseMode {
    /// Summarise packed chunks, then summarise the summaries, until one remains.
    TreeSummarize,
}

impl ResponseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseMode::TreeSummarize => "tree_summarize",
        }
    }
}

impl fmt::Display for ResponseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Call-time parameters wrapped around the index handle.
///
/// No per-question knobs: everything question-specific flows through the
/// template slots.
#[derive(Clone, Debug)]
pub struct QueryEngineConfig {
    pub similarity_top_k: NonZeroUsize,
    pub response_mode: ResponseMode,
    pub text_qa_template: PromptTemplate,
    /// Summarise chunks of one tree level concurrently.
    pub use_async: bool,
    /// Token streaming. Must stay `false`.
    pub streaming: bool,
    pub context_window: usize,
    pub num_output: usize,
}

impl Default for QueryEngineConfig {
    fn default() -> Self {
        Self {
            similarity_top_k: NonZeroUsize::new(DEFAULT_SIMILARITY_TOP_K)
                .unwrap_or(NonZeroUsize::MIN),
            response_mode: ResponseMode::TreeSummarize,
            text_qa_template: PromptTemplate::detailed_qa(),
            use_async: false,
            streaming: false,
            context_window: DEFAULT_CONTEXT_WINDOW,
            num_output: DEFAULT_NUM_OUTPUT,
        }
    }
}

impl QueryEngineConfig {
    /// Validates config values.
    pub fn validate(&self) -> Result<(), ContextorError> {
        if self.streaming {
            return Err(ContextorError::Config("streaming responses are not supported".into()));
        }
        if self.num_output >= self.context_window {
            return Err(ContextorError::Config(
                "num_output must be smaller than context_window".into(),
            ));
        }
        Ok(())
    }

    /// Characters of context that fit into one completion call for `question`.
    pub fn chunk_budget(&self, question: &str) -> usize {
        let window_chars = self
            .context_window
            .saturating_sub(self.num_output)
            .saturating_mul(CHARS_PER_TOKEN);
        window_chars
            .saturating_sub(self.text_qa_template.scaffold_len())
            .saturating_sub(question.len())
            .max(MIN_CHUNK_CHARS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployment() {
        let cfg = QueryEngineConfig::default();
        assert_eq!(cfg.similarity_top_k.get(), 30);
        assert_eq!(cfg.response_mode.to_string(), "tree_summarize");
        assert!(!cfg.use_async);
        assert!(!cfg.streaming);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn streaming_is_rejected() {
        let cfg = QueryEngineConfig {
            streaming: true,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn budget_shrinks_with_question_and_has_floor() {
        let cfg = QueryEngineConfig::default();
        let short = cfg.chunk_budget("q");
        let long = cfg.chunk_budget(&"q".repeat(1000));
        assert_eq!(short - long, 999);

        let tiny = QueryEngineConfig {
            context_window: 10,
            num_output: 9,
            ..Default::default()
        };
        assert_eq!(tiny.chunk_budget("q"), MIN_CHUNK_CHARS);
    }
}
