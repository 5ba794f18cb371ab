use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One passage returned by the hosted retrieval step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RetrievedNode {
    pub id: String,
    pub text: String,
    pub score: Option<f32>,
    /// Free-form document metadata (file name, page, ...). Opaque here.
    pub metadata: Value,
}

impl RetrievedNode {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            score: None,
            metadata: Value::Null,
        }
    }
}
