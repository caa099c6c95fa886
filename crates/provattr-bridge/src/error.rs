//! Error types for the Attribute Bridge

use thiserror::Error;

use crate::store::StoreError;
use provattr_core::CodecError;

/// Result type for Attribute Bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors that can escape the Attribute Bridge
///
/// Malformed on-disk records and foreign attribute shapes never appear here;
/// both degrade to "no provenance" on the read path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// Record encoding failed on the write path
    #[error("provenance codec error: {0}")]
    Codec(#[from] CodecError),

    /// Attribute-store failure, propagated unchanged
    #[error("attribute store error: {0}")]
    Store(#[from] StoreError),
}
