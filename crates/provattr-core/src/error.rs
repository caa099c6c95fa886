//! Error types for the provenance record codec

use thiserror::Error;

/// Result type alias using CodecError
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors that can occur while encoding or decoding a provenance record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Encoded record does not fit the fixed attribute width
    #[error("encoded record needs {needed} bytes, limit is {limit}")]
    TooLarge { needed: usize, limit: usize },

    /// On-disk text fails to parse as `key=value|key=value`
    #[error("malformed provenance record: {0}")]
    MalformedRecord(String),
}
