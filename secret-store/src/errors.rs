//! Error type for secret resolution.

use std::path::PathBuf;

use thiserror::Error;

use crate::credentials::{COMPLETION_KEY_NAME, RETRIEVAL_KEY_NAME};

/// Errors raised while reading secrets.
///
/// `Missing` is terminal for the session: there is no retry, the operator
/// must supply the secrets and restart the process.
#[derive(Debug, Error)]
pub enum SecretError {
    /// One or more required secrets are absent or blank.
    #[error("[Secret Store] missing required secrets: {}", .names.join(", "))]
    Missing { names: Vec<&'static str> },

    /// The secrets file exists but could not be read.
    #[error("[Secret Store] failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The secrets file is not valid TOML.
    #[error("[Secret Store] invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl SecretError {
    /// Operator-facing remediation text: the exact secret names expected and
    /// how to provide them.
    pub fn setup_guidance(&self) -> String {
        let mut out = String::new();
        match self {
            SecretError::Missing { names } => {
                out.push_str("API key not found: ");
                out.push_str(&names.join(", "));
                out.push_str("\n\n");
            }
            other => {
                out.push_str(&other.to_string());
                out.push_str("\n\n");
            }
        }
        out.push_str("Add the following keys to secrets.toml (or export them / put them in .env):\n\n");
        out.push_str(&format!("    {RETRIEVAL_KEY_NAME} = \"your-llamaindex-key\"\n"));
        out.push_str(&format!("    {COMPLETION_KEY_NAME} = \"your-openai-key\"\n\n"));
        out.push_str("How to add them:\n");
        out.push_str("  1. Create secrets.toml next to the binary (or point SECRETS_FILE at it)\n");
        out.push_str("  2. Paste both keys using the names above\n");
        out.push_str("  3. Alternatively set them as environment variables\n");
        out.push_str("  4. Save the file\n");
        out.push_str("  5. Restart the service\n");
        out
    }
}
