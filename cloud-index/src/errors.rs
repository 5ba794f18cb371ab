//! Unified error types for the crate.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while connecting to or querying the hosted index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Network / client failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("HTTP {status} from {url}: {snippet}")]
    HttpStatus {
        status: StatusCode,
        url: String,
        snippet: String,
    },

    /// The project or index named in the identity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Response body did not have the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Trims a response body to a short single-line snippet.
pub(crate) fn snippet(body: &str) -> String {
    const MAX: usize = 300;
    let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.len() <= MAX {
        return flat;
    }
    let mut end = MAX;
    while !flat.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &flat[..end])
}
