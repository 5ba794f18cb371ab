//! Credential resolver for the hosted retrieval index and completion API.
//!
//! Both keys are read once at process start. A missing key is a fatal
//! configuration error: the caller is expected to print
//! [`SecretError::setup_guidance`] and exit.

mod credentials;
mod errors;
mod store;

pub use credentials::{COMPLETION_KEY_NAME, Credentials, RETRIEVAL_KEY_NAME, resolve};
pub use errors::SecretError;
pub use store::{ChainedSecretStore, EnvSecretStore, MemorySecretStore, SecretStore, TomlSecretStore};

/// Default secrets file, relative to the working directory.
pub const DEFAULT_SECRETS_FILE: &str = "secrets.toml";

/// Builds the production store: `SECRETS_FILE` (or `secrets.toml`) first,
/// then the process environment.
///
/// # Errors
/// Propagates read/parse failures of an existing secrets file.
pub fn default_store() -> Result<ChainedSecretStore, SecretError> {
    let path = std::env::var("SECRETS_FILE").unwrap_or_else(|_| DEFAULT_SECRETS_FILE.to_string());
    let mut chain = ChainedSecretStore::new();
    if let Some(file) = TomlSecretStore::load_optional(&path)? {
        chain = chain.with(file);
    }
    Ok(chain.with(EnvSecretStore))
}
