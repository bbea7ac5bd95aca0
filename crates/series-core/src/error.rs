//! Core error types.

use thiserror::Error;

/// Series store errors.
#[derive(Debug, Error)]
pub enum Error {
    /// File system failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted document is not a JSON array of records.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Missing or malformed request fields.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No record with the given id.
    #[error("serie not found: {0}")]
    NotFound(String),

    /// A filter matched nothing.
    #[error("no series found for gender: {0}")]
    NoMatches(String),

    /// The cache was mutated but writing the document failed.
    #[error("persist error: {0}")]
    Persist(#[source] Box<Error>),
}

/// Result alias for series store operations.
pub type Result<T> = std::result::Result<T, Error>;
