//! Secret sources.
//!
//! A [`SecretStore`] is a read-only name → value lookup. The binary chains a
//! TOML file in front of the process environment; tests use
//! [`MemorySecretStore`].

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use crate::errors::SecretError;

/// Read-only lookup of named secrets.
pub trait SecretStore: Send + Sync {
    /// Returns the raw value for `name`, if present.
    fn get(&self, name: &str) -> Option<String>;
}

/// Secrets taken from the process environment (populated from `.env` by the binary).
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSecretStore;

impl SecretStore for EnvSecretStore {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Secrets loaded from a flat TOML table (`KEY = "value"`).
///
/// Non-string values are ignored.
#[derive(Debug, Default, Clone)]
pub struct TomlSecretStore {
    values: HashMap<String, String>,
}

impl TomlSecretStore {
    /// Parses TOML text.
    pub fn parse(path: &Path, text: &str) -> Result<Self, SecretError> {
        let table: toml::Table = text.parse().map_err(|source| SecretError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let values = table
            .into_iter()
            .filter_map(|(k, v)| match v {
                toml::Value::String(s) => Some((k, s)),
                _ => None,
            })
            .collect::<HashMap<_, _>>();

        Ok(Self { values })
    }

    /// Loads the file at `path`; `Ok(None)` when it does not exist.
    ///
    /// # Errors
    /// [`SecretError::Read`] on I/O failure, [`SecretError::Parse`] on bad TOML.
    pub fn load_optional(path: impl AsRef<Path>) -> Result<Option<Self>, SecretError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "secrets file not present, skipping");
            return Ok(None);
        }
        let text = std::fs::read_to_string(path).map_err(|source| SecretError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::parse(path, &text)?;
        info!(path = %path.display(), keys = store.values.len(), "secrets file loaded");
        Ok(Some(store))
    }
}

impl SecretStore for TomlSecretStore {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

/// First store that yields a non-blank value wins.
#[derive(Default)]
pub struct ChainedSecretStore {
    stores: Vec<Box<dyn SecretStore>>,
}

impl ChainedSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a lower-priority source.
    pub fn with(mut self, store: impl SecretStore + 'static) -> Self {
        self.stores.push(Box::new(store));
        self
    }
}

impl SecretStore for ChainedSecretStore {
    fn get(&self, name: &str) -> Option<String> {
        self.stores
            .iter()
            .filter_map(|s| s.get(name))
            .find(|v| !v.trim().is_empty())
    }
}

/// In-memory store.
#[derive(Debug, Default, Clone)]
pub struct MemorySecretStore {
    values: HashMap<String, String>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.values.insert(name.to_string(), value.to_string());
        self
    }
}

impl SecretStore for MemorySecretStore {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}
