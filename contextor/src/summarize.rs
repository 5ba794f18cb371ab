//! Tree summarisation over retrieved passages.
//!
//! Passages are packed into chunks that fit one completion call. A single
//! chunk is answered directly; several chunks are each answered with the same
//! template and the answers are packed and merged again, level by level.

use futures::future::try_join_all;
use tracing::debug;

use ai_llm_service::CompletionModel;

use crate::error::ContextorError;
use crate::prompt::PromptTemplate;

/// Upper bound on tree levels before giving up.
pub const MAX_SUMMARY_DEPTH: usize = 8;

const SEPARATOR: &str = "\n\n";

/// Greedily packs `texts` into chunks of at most `budget` bytes.
///
/// Order is preserved, blank texts are skipped, and a text longer than the
/// budget is split on char boundaries.
pub fn pack_chunks<S: AsRef<str>>(texts: &[S], budget: usize) -> Vec<String> {
    let budget = budget.max(1);
    let mut out = Vec::new();
    let mut current = String::new();

    for text in texts {
        let text = text.as_ref().trim();
        if text.is_empty() {
            continue;
        }
        for piece in split_to_budget(text, budget) {
            if current.is_empty() {
                current.push_str(piece);
            } else if current.len() + SEPARATOR.len() + piece.len() <= budget {
                current.push_str(SEPARATOR);
                current.push_str(piece);
            } else {
                out.push(std::mem::take(&mut current));
                current.push_str(piece);
            }
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn split_to_budget(text: &str, budget: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut rest = text;
    while rest.len() > budget {
        let mut end = budget;
        while end > 0 && !rest.is_char_boundary(end) {
            end -= 1;
        }
        if end == 0 {
            // Budget smaller than one char: take the whole char.
            end = rest.chars().next().map(char::len_utf8).unwrap_or(rest.len());
        }
        pieces.push(&rest[..end]);
        rest = &rest[end..];
    }
    if !rest.is_empty() {
        pieces.push(rest);
    }
    pieces
}

/// Runs tree summarisation. `Ok(None)` when there is nothing to summarise.
pub async fn tree_summarize(
    llm: &dyn CompletionModel,
    template: &PromptTemplate,
    question: &str,
    texts: &[String],
    budget: usize,
    use_async: bool,
) -> Result<Option<String>, ContextorError> {
    let mut chunks = pack_chunks(texts, budget);

    // Levels 0..MAX summarise; the level after the last one may only finish.
    for depth in 0..=MAX_SUMMARY_DEPTH {
        match chunks.len() {
            0 => return Ok(None),
            1 => {
                debug!(depth, context_len = chunks[0].len(), "final synthesis call");
                let prompt = template.render(&chunks[0], question);
                return Ok(Some(llm.complete(&prompt).await?));
            }
            _ if depth == MAX_SUMMARY_DEPTH => break,
            n => {
                debug!(depth, chunks = n, use_async, "summarizing tree level");
                let summaries = if use_async {
                    try_join_all(
                        chunks
                            .iter()
                            .map(|c| complete_owned(llm, template.render(c, question))),
                    )
                    .await?
                } else {
                    let mut out = Vec::with_capacity(n);
                    for c in &chunks {
                        out.push(llm.complete(&template.render(c, question)).await?);
                    }
                    out
                };
                chunks = pack_chunks(&summaries, budget);
            }
        }
    }

    Err(ContextorError::Summarize(format!(
        "still {} chunks after {MAX_SUMMARY_DEPTH} levels",
        chunks.len()
    )))
}

async fn complete_owned(llm: &dyn CompletionModel, prompt: String) -> Result<String, ContextorError> {
    Ok(llm.complete(&prompt).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai_llm_service::AiLlmError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Records prompts and answers with a fixed short text.
    struct Recorder {
        prompts: Mutex<Vec<String>>,
        answer: String,
    }

    impl Recorder {
        fn new(answer: &str) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                answer: answer.into(),
            }
        }
        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionModel for Recorder {
        async fn complete(&self, prompt: &str) -> Result<String, AiLlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.answer.clone())
        }
        fn model_name(&self) -> &str {
            "recorder"
        }
    }

    fn template() -> PromptTemplate {
        PromptTemplate::new("C:{context_str}|Q:{query_str}").unwrap()
    }

    #[test]
    fn packs_in_order_within_budget() {
        let chunks = pack_chunks(&["aaa", "bbb", "ccc"], 8);
        assert_eq!(chunks, vec!["aaa\n\nbbb", "ccc"]);
        assert!(chunks.iter().all(|c| c.len() <= 8));
    }

    #[test]
    fn splits_oversized_text_on_char_boundaries() {
        let chunks = pack_chunks(&["ёёёёё"], 3);
        assert!(chunks.iter().all(|c| c.len() <= 3));
        assert_eq!(chunks.concat(), "ёёёёё");
    }

    #[test]
    fn skips_blank_texts() {
        assert!(pack_chunks(&["", "  \n"], 10).is_empty());
    }

    #[tokio::test]
    async fn single_chunk_is_one_call() {
        let llm = Recorder::new("final");
        let texts = vec!["p1".to_string(), "p2".to_string()];
        let out = tree_summarize(&llm, &template(), "why", &texts, 100, false)
            .await
            .unwrap();
        assert_eq!(out.as_deref(), Some("final"));
        assert_eq!(llm.prompts(), vec!["C:p1\n\np2|Q:why"]);
    }

    #[tokio::test]
    async fn several_chunks_are_summarized_then_merged() {
        let llm = Recorder::new("s");
        let texts = vec!["aaaa".to_string(), "bbbb".to_string(), "cccc".to_string()];
        let out = tree_summarize(&llm, &template(), "q", &texts, 4, false)
            .await
            .unwrap();
        assert_eq!(out.as_deref(), Some("s"));
        let prompts = llm.prompts();
        // 3 leaf calls, 2 calls for ["s\n\ns", "s"], then the final call.
        assert_eq!(prompts.len(), 6);
        assert_eq!(&prompts[..3], &["C:aaaa|Q:q", "C:bbbb|Q:q", "C:cccc|Q:q"]);
        assert_eq!(prompts.last().unwrap(), "C:s\n\ns|Q:q");
    }

    #[tokio::test]
    async fn nothing_retrieved_means_no_call() {
        let llm = Recorder::new("x");
        let out = tree_summarize(&llm, &template(), "q", &[], 100, false)
            .await
            .unwrap();
        assert!(out.is_none());
        assert!(llm.prompts().is_empty());
    }

    /// Answers "xxxx" for the first `slow` calls, then "s".
    struct Converging {
        calls: AtomicUsize,
        slow: usize,
    }

    #[async_trait]
    impl CompletionModel for Converging {
        async fn complete(&self, _prompt: &str) -> Result<String, AiLlmError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(if n < self.slow { "xxxx" } else { "s" }.to_string())
        }
        fn model_name(&self) -> &str {
            "converging"
        }
    }

    #[tokio::test]
    async fn converging_on_the_last_level_still_answers() {
        // Two chunks stay two chunks for MAX_SUMMARY_DEPTH - 1 levels, then the
        // last level merges into one and the final call answers.
        let llm = Converging {
            calls: AtomicUsize::new(0),
            slow: 2 * (MAX_SUMMARY_DEPTH - 1),
        };
        let texts = vec!["aaaa".to_string(), "bbbb".to_string()];
        let out = tree_summarize(&llm, &template(), "q", &texts, 4, false)
            .await
            .unwrap();
        assert_eq!(out.as_deref(), Some("s"));
        assert_eq!(llm.calls.load(Ordering::SeqCst), 2 * MAX_SUMMARY_DEPTH + 1);
    }

    #[tokio::test]
    async fn non_shrinking_summaries_hit_depth_limit() {
        let llm = Recorder::new("xxxxxxxx");
        let texts = vec!["aaaa".to_string(), "bbbb".to_string()];
        let err = tree_summarize(&llm, &template(), "q", &texts, 4, true)
            .await
            .unwrap_err();
        assert!(matches!(err, ContextorError::Summarize(_)));
    }
}
