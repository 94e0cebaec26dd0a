use thiserror::Error;

/// Errors produced by building or operating an [`crate::Hnsw`](crate::Hnsw) index.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A builder parameter was non-positive.
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter {
        field: &'static str,
        reason: &'static str,
    },

    /// A point's dimension did not match the dimension established by the
    /// first insertion into the index.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A search was invoked with inconsistent `k` / `ef_search` parameters.
    #[error("invalid search parameters: {reason}")]
    InvalidSearchParams { reason: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
