//! Query orchestration with error containment.
//!
//! [`Orchestrator::query`] is the only entry point the chat layer uses. It
//! never fails: a missing index, a remote error or an empty answer all come
//! back as a well-formed [`QueryResult`] with a readable `response`.

use std::sync::Arc;

use ai_llm_service::{CompletionModel, OpenAiService, config_openai_completion};
use cloud_index::{CloudIndexConfig, IndexCell, IndexConnector, LlamaCloudConnector, RetrievalIndex};
use secret_store::{Credentials, SecretStore};
use tracing::{debug, error, info, warn};

use crate::api_types::{EngineSettings, QueryResult};
use crate::cfg::QueryEngineConfig;
use crate::engine::QueryEngine;
use crate::error::ContextorError;
use crate::prompt::TARGET_LANGUAGE;

/// Returned when the index handle could not be constructed.
pub const INDEX_UNAVAILABLE_MESSAGE: &str = "Could not connect to the index";
/// Returned when the engine produced no text.
pub const EMPTY_RESPONSE_PLACEHOLDER: &str = "Could not generate a response";
/// Prefix of the contained error diagnostic.
pub const ERROR_PREFIX: &str = "Error while processing request: ";

/// Components the bootstrap closure hands back once credentials are known.
pub type Components = (Arc<dyn IndexConnector>, Arc<dyn CompletionModel>);

pub struct Orchestrator {
    cell: IndexCell,
    llm: Arc<dyn CompletionModel>,
    cfg: QueryEngineConfig,
    settings: EngineSettings,
}

impl Orchestrator {
    pub fn new(cell: IndexCell, llm: Arc<dyn CompletionModel>, cfg: QueryEngineConfig) -> Self {
        let settings = EngineSettings {
            similarity_top_k: cfg.similarity_top_k.get(),
            response_mode: cfg.response_mode.to_string(),
            model: llm.model_name().to_string(),
            temperature: None,
            max_tokens: None,
            target_language: TARGET_LANGUAGE.to_string(),
            sources_visible: false,
        };
        Self {
            cell,
            llm,
            cfg,
            settings,
        }
    }

    /// Records sampling parameters for the status panel.
    pub fn with_sampling(mut self, temperature: Option<f32>, max_tokens: Option<u32>) -> Self {
        self.settings.temperature = temperature;
        self.settings.max_tokens = max_tokens;
        self
    }

    /// Resolves credentials, then lets `build` create the remote clients.
    ///
    /// `build` is never called when a key is missing, so no remote client
    /// exists before the credential check passes.
    ///
    /// # Errors
    /// [`ContextorError::Secrets`] listing every missing key, or whatever
    /// `build` returns.
    pub fn from_secrets_with<F>(
        store: &dyn SecretStore,
        cfg: QueryEngineConfig,
        build: F,
    ) -> Result<Self, ContextorError>
    where
        F: FnOnce(&Credentials) -> Result<Components, ContextorError>,
    {
        let creds = secret_store::resolve(store)?;
        cfg.validate()?;
        let (connector, llm) = build(&creds)?;
        info!(model = %llm.model_name(), top_k = cfg.similarity_top_k.get(), "orchestrator ready");
        Ok(Self::new(IndexCell::new(connector), llm, cfg))
    }

    /// Production bootstrap: LlamaCloud index + OpenAI completions.
    pub fn from_secrets(store: &dyn SecretStore) -> Result<Self, ContextorError> {
        let mut sampling = None;
        let orchestrator = Self::from_secrets_with(store, QueryEngineConfig::default(), |creds| {
            let index_cfg = CloudIndexConfig::from_env(creds.retrieval_key());
            index_cfg.validate()?;
            let llm_cfg = config_openai_completion(creds.completion_key())?;
            sampling = Some((llm_cfg.temperature, llm_cfg.max_tokens));

            let connector: Arc<dyn IndexConnector> = Arc::new(LlamaCloudConnector::new(index_cfg));
            let llm: Arc<dyn CompletionModel> = Arc::new(OpenAiService::new(llm_cfg)?);
            Ok((connector, llm))
        })?;

        Ok(match sampling {
            Some((temperature, max_tokens)) => orchestrator.with_sampling(temperature, max_tokens),
            None => orchestrator,
        })
    }

    /// Answers `question`. Never fails; see the module docs.
    pub async fn query(&self, question: &str) -> QueryResult {
        let Some(index) = self.cell.get_index().await else {
            warn!("index unavailable, skipping query");
            return QueryResult::text(INDEX_UNAVAILABLE_MESSAGE);
        };

        match self.run(index, question).await {
            Ok(Some(text)) => QueryResult::text(text),
            Ok(None) => {
                warn!("engine returned no text");
                QueryResult::text(EMPTY_RESPONSE_PLACEHOLDER)
            }
            Err(err) => {
                error!(kind = err.kind(), error = %err, "query failed");
                QueryResult::text(format!("{ERROR_PREFIX}{}: {err}", err.kind()))
            }
        }
    }

    async fn run(
        &self,
        index: Arc<dyn RetrievalIndex>,
        question: &str,
    ) -> Result<Option<String>, ContextorError> {
        let engine = QueryEngine::build(index, Arc::clone(&self.llm), &self.cfg);
        let out = engine.query(question).await?;

        // Citations are not surfaced; keep them in the logs only.
        for node in &out.source_nodes {
            debug!(id = %node.id, score = ?node.score, "source node dropped");
        }

        Ok(out.response.filter(|text| !text.is_empty()))
    }

    /// `true` once the index handle has been constructed.
    pub async fn index_ready(&self) -> bool {
        self.cell.is_ready().await
    }

    pub async fn last_index_error(&self) -> Option<String> {
        self.cell.last_error().await
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn index_cell(&self) -> &IndexCell {
        &self.cell
    }
}
