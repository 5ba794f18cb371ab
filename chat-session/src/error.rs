use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no example question with index {0}")]
    UnknownExample(usize),
}
