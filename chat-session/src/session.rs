//! One conversation: a transcript plus the submit sequence.

use async_trait::async_trait;
use contextor::{Orchestrator, QueryResult};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::SessionError;
use crate::transcript::{Transcript, Turn};

/// Fixed example questions offered next to the input box.
pub const EXAMPLE_QUESTIONS: [&str; 6] = [
    "Tell me in detail about investment strategies",
    "What is an equal-weight investment strategy?",
    "Explain portfolio variance minimisation methods",
    "How does dynamic volatility hedging work?",
    "What is the difference between static and dynamic strategies?",
    "Explain the principles of maximum portfolio diversification",
];

/// Produces an answer record for a question.
#[async_trait]
pub trait Answerer: Send + Sync {
    async fn answer(&self, question: &str) -> QueryResult;
}

#[async_trait]
impl Answerer for Orchestrator {
    async fn answer(&self, question: &str) -> QueryResult {
        self.query(question).await
    }
}

#[derive(Debug)]
pub struct Session {
    id: Uuid,
    transcript: Transcript,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            transcript: Transcript::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Drops every turn; the session looks freshly created afterwards.
    pub fn reset(&mut self) {
        debug!(session = %self.id, turns = self.transcript.len(), "transcript cleared");
        self.transcript.clear();
    }

    /// Appends the question, asks `answerer`, appends and returns the answer.
    pub async fn submit(&mut self, question: &str, answerer: &dyn Answerer) -> Turn {
        self.transcript.append(Turn::user(question));
        let result = answerer.answer(question).await;
        let turn = Turn::assistant(result.response);
        self.transcript.append(turn.clone());
        info!(session = %self.id, turns = self.transcript.len(), "question answered");
        turn
    }

    /// Same as [`Session::submit`] with one of [`EXAMPLE_QUESTIONS`].
    ///
    /// # Errors
    /// [`SessionError::UnknownExample`] if `index` is out of range; the
    /// transcript is left untouched.
    pub async fn submit_example(
        &mut self,
        index: usize,
        answerer: &dyn Answerer,
    ) -> Result<Turn, SessionError> {
        let question = example_question(index)?;
        Ok(self.submit(question, answerer).await)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

pub fn example_question(index: usize) -> Result<&'static str, SessionError> {
    EXAMPLE_QUESTIONS
        .get(index)
        .copied()
        .ok_or(SessionError::UnknownExample(index))
}
