use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("Incorrect ID: wrong ID syntax")]
    InvalidKeySyntax(String),

    #[error("Incorrect ID: identifier exceeds {max} characters")]
    KeyTooLong { len: usize, max: usize },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

pub type TypeResult<T> = Result<T, TypeError>;
