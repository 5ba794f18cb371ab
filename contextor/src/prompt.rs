//! Prompt template with two slots: retrieved context and the user question.
//!
//! The instructional scaffold is fixed; only the slot values change between
//! calls. Values are inserted verbatim in a single pass, so a slot marker that
//! appears inside a value is never expanded again.

use std::borrow::Cow;

use crate::error::ContextorError;

/// Slot filled with retrieved passages (or partial summaries).
pub const CONTEXT_SLOT: &str = "{context_str}";
/// Slot filled with the user's literal question.
pub const QUESTION_SLOT: &str = "{query_str}";

/// Language every answer must be written in.
pub const TARGET_LANGUAGE: &str = "Russian";

const DETAILED_QA_TEXT: &str = "\
You are an expert in finance and portfolio management. Your task is to give an exhaustive, detailed and academically precise answer IN RUSSIAN based on the provided context.

IMPORTANT: ANSWER ONLY IN RUSSIAN!

ANSWER INSTRUCTIONS:
1. Give a detailed, comprehensive explanation in an academic style with accessible wording
2. Structure the answer with clear subheadings
3. Include concrete examples, figures and formulas from the documents
4. Explain the practical application and significance
5. State advantages and drawbacks (where applicable)
6. Translate every English term into Russian and keep the original in parentheses
7. If the information is insufficient, say so explicitly

ANSWER STRUCTURE (headings in Russian):
- **Определение** (Definition): a precise definition of the term or concept
- **Принципы работы** (Working principles): how it functions
- **Математические основы** (Mathematical foundations): formulas and calculations (if any)
- **Практические примеры** (Practical examples): concrete cases from the documents
- **Преимущества и недостатки** (Advantages and drawbacks): an objective analysis
- **Применение** (Applications): where and how it is used
- **Связь с другими концепциями** (Relation to other concepts): place in the wider theory

DOCUMENT CONTEXT:
{context_str}

USER QUESTION:
{query_str}

DETAILED ANSWER IN RUSSIAN:
";

/// Fixed-scaffold template with [`CONTEXT_SLOT`] and [`QUESTION_SLOT`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptTemplate {
    text: Cow<'static, str>,
}

impl PromptTemplate {
    /// Wraps `text`, which must contain both slots.
    ///
    /// # Errors
    /// [`ContextorError::Config`] if a slot is missing.
    pub fn new(text: impl Into<Cow<'static, str>>) -> Result<Self, ContextorError> {
        let text = text.into();
        for slot in [CONTEXT_SLOT, QUESTION_SLOT] {
            if !text.contains(slot) {
                return Err(ContextorError::Config(format!(
                    "prompt template is missing the {slot} slot"
                )));
            }
        }
        Ok(Self { text })
    }

    /// The detailed Q&A template used for every answer.
    pub fn detailed_qa() -> Self {
        Self {
            text: Cow::Borrowed(DETAILED_QA_TEXT),
        }
    }

    /// Substitutes both slots in one pass.
    ///
    /// # Example
    /// ```
    /// use contextor::PromptTemplate;
    /// let t = PromptTemplate::new("C={context_str} Q={query_str}").unwrap();
    /// assert_eq!(t.render("ctx", "why?"), "C=ctx Q=why?");
    /// ```
    pub fn render(&self, context: &str, question: &str) -> String {
        let mut out = String::with_capacity(self.text.len() + context.len() + question.len());
        let mut rest: &str = &self.text;

        while let Some(pos) = rest.find('{') {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];
            if let Some(after) = tail.strip_prefix(CONTEXT_SLOT) {
                out.push_str(context);
                rest = after;
            } else if let Some(after) = tail.strip_prefix(QUESTION_SLOT) {
                out.push_str(question);
                rest = after;
            } else {
                out.push('{');
                rest = &tail[1..];
            }
        }
        out.push_str(rest);
        out
    }

    /// Length of the fixed text, slots excluded.
    pub fn scaffold_len(&self) -> usize {
        let slots = self.text.matches(CONTEXT_SLOT).count() * CONTEXT_SLOT.len()
            + self.text.matches(QUESTION_SLOT).count() * QUESTION_SLOT.len();
        self.text.len() - slots
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::detailed_qa()
    }
}
