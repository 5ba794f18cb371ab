//! Per-connection conversation state.
//!
//! A [`Session`] owns its [`Transcript`] and runs the submit sequence
//! (user turn, answer, assistant turn). [`SessionRegistry`] keeps live
//! sessions for the HTTP layer.

mod error;
mod registry;
mod session;
mod transcript;

pub use error::SessionError;
pub use registry::{DEFAULT_IDLE_TTL, SessionRegistry, SharedSession};
pub use session::{Answerer, EXAMPLE_QUESTIONS, Session, example_question};
pub use transcript::{Role, Transcript, Turn};
