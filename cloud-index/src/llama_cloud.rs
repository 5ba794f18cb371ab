//! Thin adapter around the LlamaCloud REST API.
//!
//! Connecting resolves the identity triple to a pipeline id:
//! - GET  {base}/api/v1/projects?project_name=..&organization_id=..
//! - GET  {base}/api/v1/pipelines?project_id=..&pipeline_name=..
//!
//! Retrieval:
//! - POST {base}/api/v1/pipelines/{id}/retrieve

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use reqwest::header;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::CloudIndexConfig;
use crate::errors::{IndexError, snippet};
use crate::record::RetrievedNode;
use crate::{IndexConnector, RetrievalIndex};

/// Builds [`LlamaCloudIndex`] handles from a fixed config.
pub struct LlamaCloudConnector {
    cfg: CloudIndexConfig,
}

impl LlamaCloudConnector {
    pub fn new(cfg: CloudIndexConfig) -> Self {
        Self { cfg }
    }
}

#[async_trait]
impl IndexConnector for LlamaCloudConnector {
    async fn connect(&self) -> Result<Arc<dyn RetrievalIndex>, IndexError> {
        let index = LlamaCloudIndex::connect(&self.cfg).await?;
        Ok(Arc::new(index))
    }
}

/// Handle to one hosted pipeline. Read-only after construction.
pub struct LlamaCloudIndex {
    client: reqwest::Client,
    name: String,
    pipeline_id: String,
    url_retrieve: String,
}

impl LlamaCloudIndex {
    /// Resolves project and pipeline ids for `cfg.identity`.
    ///
    /// # Errors
    /// - [`IndexError::Config`] on invalid config
    /// - [`IndexError::NotFound`] if the project or index does not exist
    /// - [`IndexError::HttpStatus`] on auth rejection or other non-2xx
    /// - [`IndexError::Transport`] on network failure
    pub async fn connect(cfg: &CloudIndexConfig) -> Result<Self, IndexError> {
        cfg.validate()?;
        let started = Instant::now();

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", cfg.api_key))
                .map_err(|e| IndexError::Config(format!("invalid API key header: {e}")))?,
        );
        let client = reqwest::Client::builder().default_headers(headers).build()?;
        let base = cfg.base_url.trim().trim_end_matches('/').to_string();
        let id = &cfg.identity;

        let projects: Vec<NamedEntity> = get_json(
            &client,
            &format!("{base}/api/v1/projects"),
            &[
                ("project_name", id.project_name.as_str()),
                ("organization_id", id.organization_id.as_str()),
            ],
        )
        .await?;
        let project = projects
            .into_iter()
            .find(|p| p.name == id.project_name)
            .ok_or_else(|| {
                IndexError::NotFound(format!(
                    "project '{}' in organization '{}'",
                    id.project_name, id.organization_id
                ))
            })?;
        debug!(project_id = %project.id, "project resolved");

        let pipelines: Vec<NamedEntity> = get_json(
            &client,
            &format!("{base}/api/v1/pipelines"),
            &[
                ("project_id", project.id.as_str()),
                ("pipeline_name", id.index_name.as_str()),
            ],
        )
        .await?;
        let pipeline = pipelines
            .into_iter()
            .find(|p| p.name == id.index_name)
            .ok_or_else(|| {
                IndexError::NotFound(format!(
                    "index '{}' in project '{}'",
                    id.index_name, id.project_name
                ))
            })?;

        info!(
            index = %id.index_name,
            project = %id.project_name,
            pipeline_id = %pipeline.id,
            latency_ms = started.elapsed().as_millis(),
            "connected to hosted index"
        );

        let url_retrieve = format!("{base}/api/v1/pipelines/{}/retrieve", pipeline.id);
        Ok(Self {
            client,
            name: id.index_name.clone(),
            pipeline_id: pipeline.id,
            url_retrieve,
        })
    }

    pub fn pipeline_id(&self) -> &str {
        &self.pipeline_id
    }
}

#[async_trait]
impl RetrievalIndex for LlamaCloudIndex {
    async fn retrieve(
        &self,
        query: &str,
        top_k: NonZeroUsize,
    ) -> Result<Vec<RetrievedNode>, IndexError> {
        let started = Instant::now();
        let body = RetrieveRequest {
            query,
            dense_similarity_top_k: top_k.get(),
        };
        debug!(top_k = top_k.get(), query_len = query.len(), "POST {}", self.url_retrieve);

        let resp = self.client.post(&self.url_retrieve).json(&body).send().await?;
        let out: RetrieveResponse = decode(resp, &self.url_retrieve).await?;

        let nodes = out
            .retrieval_nodes
            .into_iter()
            .map(|n| RetrievedNode {
                id: n.node.id,
                text: n.node.text,
                score: n.score,
                metadata: n.node.metadata,
            })
            .collect::<Vec<_>>();

        info!(
            index = %self.name,
            hits = nodes.len(),
            latency_ms = started.elapsed().as_millis(),
            "retrieval completed"
        );
        Ok(nodes)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    query: &[(&str, &str)],
) -> Result<T, IndexError> {
    debug!("GET {url}");
    let resp = client.get(url).query(query).send().await?;
    decode(resp, url).await
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response, url: &str) -> Result<T, IndexError> {
    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await.unwrap_or_default();
        let snippet = snippet(&text);
        error!(%status, %url, %snippet, "index API returned non-success status");
        return Err(IndexError::HttpStatus {
            status,
            url: url.to_string(),
            snippet,
        });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| IndexError::Decode(format!("{url}: {e}")))
}

/* ===========================================================================
HTTP payloads
======================================================================== */

#[derive(Debug, Deserialize)]
struct NamedEntity {
    id: String,
    name: String,
}

#[derive(Debug, Serialize)]
struct RetrieveRequest<'a> {
    query: &'a str,
    dense_similarity_top_k: usize,
}

#[derive(Debug, Deserialize)]
struct RetrieveResponse {
    #[serde(default)]
    retrieval_nodes: Vec<ScoredNode>,
}

#[derive(Debug, Deserialize)]
struct ScoredNode {
    node: TextNode,
    #[serde(default)]
    score: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct TextNode {
    #[serde(rename = "id_", alias = "id", default)]
    id: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    metadata: Value,
}
