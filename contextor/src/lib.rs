//! Question answering over the hosted paper index.
//!
//! Public API: [`Orchestrator::query`]. It obtains the memoized index handle,
//! builds a [`QueryEngine`] with fixed parameters, retrieves the top passages,
//! tree-summarises them with the detailed Q&A prompt and returns the answer
//! text. Every failure is contained and reported as answer text.
//!
//! # Example
//! ```no_run
//! # use contextor::Orchestrator;
//! # #[tokio::main] async fn main() {
//! let store = secret_store::default_store().unwrap();
//! let orchestrator = Orchestrator::from_secrets(&store).unwrap();
//! let out = orchestrator.query("What is an equal-weight strategy?").await;
//! println!("{}", out.response);
//! # }
//! ```

mod api_types;
mod cfg;
mod engine;
mod error;
mod orchestrator;
mod prompt;
mod summarize;

pub use api_types::{EngineSettings, QueryResult};
pub use cfg::{
    CHARS_PER_TOKEN, DEFAULT_CONTEXT_WINDOW, DEFAULT_NUM_OUTPUT, DEFAULT_SIMILARITY_TOP_K,
    QueryEngineConfig, ResponseMode,
};
pub use engine::{EngineResponse, QueryEngine};
pub use error::ContextorError;
pub use orchestrator::{
    Components, EMPTY_RESPONSE_PLACEHOLDER, ERROR_PREFIX, INDEX_UNAVAILABLE_MESSAGE, Orchestrator,
};
pub use prompt::{CONTEXT_SLOT, PromptTemplate, QUESTION_SLOT, TARGET_LANGUAGE};
pub use summarize::{MAX_SUMMARY_DEPTH, pack_chunks, tree_summarize};
