//! Error types for index construction and queries.

use thiserror::Error;

/// Errors raised while building, loading, or querying an FM-index.
///
/// "Pattern not found" is never an error: a query for a symbol the text
/// does not contain simply counts zero.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// The text or pattern violates the sentinel/alphabet rules.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Construction was aborted through a [`CancelToken`](super::CancelToken).
    #[error("index construction cancelled")]
    Cancelled,

    /// A persisted index failed validation.
    #[error("corrupt index: {0}")]
    Corrupt(String),
}

impl IndexError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        IndexError::InvalidInput(msg.into())
    }

    pub(crate) fn corrupt(msg: impl Into<String>) -> Self {
        IndexError::Corrupt(msg.into())
    }
}

/// A specialized Result type for index operations.
pub type Result<T> = std::result::Result<T, IndexError>;
