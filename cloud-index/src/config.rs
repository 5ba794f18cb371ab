//! Index identity and connection configuration.

use crate::errors::IndexError;

/// Name of the hosted index (pipeline) holding the paper collection.
pub const DEFAULT_INDEX_NAME: &str = "Arxiv(Vilatility) 28/05";
/// Project the index lives in.
pub const DEFAULT_PROJECT_NAME: &str = "Default";
/// Organization owning the project.
pub const DEFAULT_ORGANIZATION_ID: &str = "3fee475d-903c-4b04-b81a-50c133aca474";
/// Public LlamaCloud API base.
pub const DEFAULT_BASE_URL: &str = "https://api.cloud.llamaindex.ai";

/// Immutable address of exactly one remote document collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexIdentity {
    pub index_name: String,
    pub project_name: String,
    pub organization_id: String,
}

impl Default for IndexIdentity {
    fn default() -> Self {
        Self {
            index_name: DEFAULT_INDEX_NAME.to_string(),
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            organization_id: DEFAULT_ORGANIZATION_ID.to_string(),
        }
    }
}

/// Everything needed to build a handle to the hosted index.
#[derive(Clone)]
pub struct CloudIndexConfig {
    /// API base, e.g. `https://api.cloud.llamaindex.ai`.
    pub base_url: String,
    /// Bearer key for the retrieval service.
    pub api_key: String,
    pub identity: IndexIdentity,
}

impl CloudIndexConfig {
    /// Compiled-in identity with env overrides (`INDEX_NAME`,
    /// `INDEX_PROJECT_NAME`, `INDEX_ORGANIZATION_ID`, `LLAMA_CLOUD_BASE_URL`).
    /// Read once at startup.
    pub fn from_env(api_key: &str) -> Self {
        Self {
            base_url: env("LLAMA_CLOUD_BASE_URL", DEFAULT_BASE_URL),
            api_key: api_key.to_string(),
            identity: IndexIdentity {
                index_name: env("INDEX_NAME", DEFAULT_INDEX_NAME),
                project_name: env("INDEX_PROJECT_NAME", DEFAULT_PROJECT_NAME),
                organization_id: env("INDEX_ORGANIZATION_ID", DEFAULT_ORGANIZATION_ID),
            },
        }
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), IndexError> {
        let base = self.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(IndexError::Config(
                "base_url must start with http:// or https://".into(),
            ));
        }
        if self.api_key.trim().is_empty() {
            return Err(IndexError::Config("api_key is empty".into()));
        }
        if self.identity.index_name.trim().is_empty() {
            return Err(IndexError::Config("index_name is empty".into()));
        }
        if self.identity.project_name.trim().is_empty() {
            return Err(IndexError::Config("project_name is empty".into()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for CloudIndexConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudIndexConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("identity", &self.identity)
            .finish()
    }
}

fn env(k: &str, dflt: &str) -> String {
    std::env::var(k)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| dflt.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> CloudIndexConfig {
        CloudIndexConfig {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: "llx-1".into(),
            identity: IndexIdentity::default(),
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert!(cfg().validate().is_ok());
    }

    #[test]
    fn rejects_blank_key_and_bad_scheme() {
        let mut c = cfg();
        c.api_key = " ".into();
        assert!(matches!(c.validate(), Err(IndexError::Config(_))));

        let mut c = cfg();
        c.base_url = "api.cloud.llamaindex.ai".into();
        assert!(matches!(c.validate(), Err(IndexError::Config(_))));
    }

    #[test]
    fn debug_hides_key() {
        assert!(!format!("{:?}", cfg()).contains("llx-1"));
    }
}
