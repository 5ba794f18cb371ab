use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in the conversation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered, append-only list of turns. `clear` is the only removal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn all(&self) -> &[Turn] {
        &self.turns
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_append_order() {
        let mut t = Transcript::new();
        t.append(Turn::user("q1"));
        t.append(Turn::assistant("a1"));
        t.append(Turn::user("q2"));
        let contents: Vec<_> = t.all().iter().map(|x| x.content.as_str()).collect();
        assert_eq!(contents, ["q1", "a1", "q2"]);
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut t = Transcript::new();
        t.clear();
        assert_eq!(t, Transcript::new());

        t.append(Turn::user("q"));
        t.clear();
        t.clear();
        assert!(t.all().is_empty());
        assert_eq!(t, Transcript::new());
    }

    #[test]
    fn serializes_with_lowercase_roles() {
        let mut t = Transcript::new();
        t.append(Turn::user("hi"));
        t.append(Turn::assistant("привет"));
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"role": "user", "content": "hi"},
                {"role": "assistant", "content": "привет"}
            ])
        );
    }
}
