//! Handle to the hosted document-retrieval index.
//!
//! The index is opaque: indexing, embedding, chunking and vector search all
//! happen on the service side. This crate only
//! - resolves the configured identity to a pipeline ([`LlamaCloudConnector`]),
//! - retrieves the top passages for a question ([`RetrievalIndex`]),
//! - memoizes the handle for the process lifetime ([`IndexCell`]).

mod cell;
mod config;
mod errors;
mod llama_cloud;
mod record;

use std::num::NonZeroUsize;
use std::sync::Arc;

use async_trait::async_trait;

pub use cell::IndexCell;
pub use config::{
    CloudIndexConfig, DEFAULT_BASE_URL, DEFAULT_INDEX_NAME, DEFAULT_ORGANIZATION_ID,
    DEFAULT_PROJECT_NAME, IndexIdentity,
};
pub use errors::IndexError;
pub use llama_cloud::{LlamaCloudConnector, LlamaCloudIndex};
pub use record::RetrievedNode;

/// A connected, read-only retrieval index.
#[async_trait]
pub trait RetrievalIndex: Send + Sync {
    /// Returns up to `top_k` passages relevant to `query`.
    async fn retrieve(
        &self,
        query: &str,
        top_k: NonZeroUsize,
    ) -> Result<Vec<RetrievedNode>, IndexError>;

    /// Human-readable index name.
    fn name(&self) -> &str;
}

/// Builds index handles. Called by [`IndexCell`] until one succeeds.
#[async_trait]
pub trait IndexConnector: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn RetrievalIndex>, IndexError>;
}
