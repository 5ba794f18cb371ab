//! One-shot query engine: retrieve from the hosted index, then synthesise.

use std::sync::Arc;
use std::time::Instant;

use ai_llm_service::CompletionModel;
use cloud_index::{RetrievalIndex, RetrievedNode};
use tracing::{debug, info};

use crate::cfg::{QueryEngineConfig, ResponseMode};
use crate::error::ContextorError;
use crate::summarize::tree_summarize;

/// Raw engine output, before the orchestrator applies its policies.
#[derive(Clone, Debug)]
pub struct EngineResponse {
    /// Synthesised text; `None` when nothing was retrieved.
    pub response: Option<String>,
    /// Passages the answer was built from.
    pub source_nodes: Vec<RetrievedNode>,
}

/// Index handle + completion model + fixed parameters.
pub struct QueryEngine {
    index: Arc<dyn RetrievalIndex>,
    llm: Arc<dyn CompletionModel>,
    cfg: QueryEngineConfig,
}

impl QueryEngine {
    /// Pure construction; no I/O.
    pub fn build(
        index: Arc<dyn RetrievalIndex>,
        llm: Arc<dyn CompletionModel>,
        cfg: &QueryEngineConfig,
    ) -> Self {
        Self {
            index,
            llm,
            cfg: cfg.clone(),
        }
    }

    pub fn config(&self) -> &QueryEngineConfig {
        &self.cfg
    }

    /// Runs retrieval and synthesis for `question`.
    ///
    /// # Errors
    /// Index, completion and summarisation failures propagate unchanged.
    pub async fn query(&self, question: &str) -> Result<EngineResponse, ContextorError> {
        self.cfg.validate()?;
        let started = Instant::now();

        let nodes = self
            .index
            .retrieve(question, self.cfg.similarity_top_k)
            .await?;
        debug!(index = %self.index.name(), hits = nodes.len(), "passages retrieved");

        let texts = nodes.iter().map(|n| n.text.clone()).collect::<Vec<_>>();
        let response = match self.cfg.response_mode {
            ResponseMode::TreeSummarize => {
                tree_summarize(
                    self.llm.as_ref(),
                    &self.cfg.text_qa_template,
                    question,
                    &texts,
                    self.cfg.chunk_budget(question),
                    self.cfg.use_async,
                )
                .await?
            }
        };

        info!(
            model = %self.llm.model_name(),
            mode = %self.cfg.response_mode,
            hits = nodes.len(),
            answered = response.is_some(),
            latency_ms = started.elapsed().as_millis(),
            "query completed"
        );

        Ok(EngineResponse {
            response,
            source_nodes: nodes,
        })
    }
}
