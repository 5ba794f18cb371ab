//! Credential resolution for the two hosted services.

use std::fmt;

use tracing::{error, info};

use crate::errors::SecretError;
use crate::store::SecretStore;

/// Secret name of the managed retrieval index key.
pub const RETRIEVAL_KEY_NAME: &str = "LLAMAINDEX_API_KEY";

/// Secret name of the completion service key.
pub const COMPLETION_KEY_NAME: &str = "OPENAI_API_KEY";

/// The two opaque API keys. Both are guaranteed non-blank.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    retrieval_key: String,
    completion_key: String,
}

impl Credentials {
    pub fn retrieval_key(&self) -> &str {
        &self.retrieval_key
    }

    pub fn completion_key(&self) -> &str {
        &self.completion_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("retrieval_key", &"<redacted>")
            .field("completion_key", &"<redacted>")
            .finish()
    }
}

/// Reads both keys from `store`.
///
/// Blank values count as missing. Every missing name is reported at once so
/// the operator can fix the configuration in one pass.
///
/// # Errors
/// [`SecretError::Missing`] if either key is absent.
pub fn resolve(store: &dyn SecretStore) -> Result<Credentials, SecretError> {
    let read = |name: &'static str| store.get(name).filter(|v| !v.trim().is_empty());

    let retrieval = read(RETRIEVAL_KEY_NAME);
    let completion = read(COMPLETION_KEY_NAME);

    match (retrieval, completion) {
        (Some(retrieval_key), Some(completion_key)) => {
            info!("retrieval and completion credentials resolved");
            Ok(Credentials {
                retrieval_key,
                completion_key,
            })
        }
        (retrieval, completion) => {
            let mut names = Vec::with_capacity(2);
            if retrieval.is_none() {
                names.push(RETRIEVAL_KEY_NAME);
            }
            if completion.is_none() {
                names.push(COMPLETION_KEY_NAME);
            }
            error!(missing = ?names, "required secrets are missing");
            Err(SecretError::Missing { names })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySecretStore;

    #[test]
    fn resolves_both_keys() {
        let store = MemorySecretStore::new()
            .with(RETRIEVAL_KEY_NAME, "llx-1")
            .with(COMPLETION_KEY_NAME, "sk-1");
        let creds = resolve(&store).unwrap();
        assert_eq!(creds.retrieval_key(), "llx-1");
        assert_eq!(creds.completion_key(), "sk-1");
    }

    #[test]
    fn reports_every_missing_name() {
        let err = resolve(&MemorySecretStore::new()).unwrap_err();
        match err {
            SecretError::Missing { names } => {
                assert_eq!(names, vec![RETRIEVAL_KEY_NAME, COMPLETION_KEY_NAME]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn blank_value_is_missing() {
        let store = MemorySecretStore::new()
            .with(RETRIEVAL_KEY_NAME, "llx-1")
            .with(COMPLETION_KEY_NAME, "   ");
        let err = resolve(&store).unwrap_err();
        assert!(matches!(err, SecretError::Missing { ref names } if names == &[COMPLETION_KEY_NAME]));
    }

    #[test]
    fn guidance_names_both_secrets() {
        let err = resolve(&MemorySecretStore::new().with(RETRIEVAL_KEY_NAME, "x")).unwrap_err();
        let text = err.setup_guidance();
        assert!(text.contains(RETRIEVAL_KEY_NAME));
        assert!(text.contains(COMPLETION_KEY_NAME));
        assert!(text.contains("Restart"));
    }

    #[test]
    fn debug_redacts_keys() {
        let store = MemorySecretStore::new()
            .with(RETRIEVAL_KEY_NAME, "llx-secret")
            .with(COMPLETION_KEY_NAME, "sk-secret");
        let shown = format!("{:?}", resolve(&store).unwrap());
        assert!(!shown.contains("llx-secret"));
        assert!(!shown.contains("sk-secret"));
    }
}
