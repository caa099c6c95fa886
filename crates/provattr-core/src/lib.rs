//! # Provattr Core
//!
//! Pure logic for the container provenance attribute: the record type, the
//! flat-text codec, the process-wide canonical record builder, and the
//! enumeration mask that hides the attribute from ordinary listings.
//!
//! ## Key Concepts
//!
//! - **Provenance record**: which library versions produced a container file,
//!   encoded as `key=value` pairs joined by `|`
//! - **Canonical record**: the single record this process writes into every
//!   file it creates, built once from the linked library versions
//! - **Masking**: count/index adjustment so the attribute, when at slot zero,
//!   never appears in caller-visible enumeration
//!
//! ## Invariants
//!
//! 1. The zero record (`version == 0`) means "no provenance recorded";
//!    every read-path failure degrades to it rather than erroring
//! 2. Decoding is all-or-nothing: a malformed segment rejects the whole
//!    document, never a partially populated record
//! 3. The canonical record is built at most once per process and is
//!    immutable thereafter

pub mod canonical;
pub mod codec;
pub mod error;
pub mod mask;
pub mod record;

pub use canonical::{canonical_record, init_canonical_record, BackendVersion};
pub use codec::{decode, encode};
pub use error::{CodecError, Result};
pub use mask::{count_visible, translate_index};
pub use record::{
    ProvenanceRecord, KEY_BACKEND_LIB, KEY_CONTAINER_LIB, KEY_VERSION, PROV_ATTR_LENGTH,
    PROV_ATTR_NAME, PROV_FORMAT_VERSION, PROV_MAX_FIELD, PROV_SEPARATOR,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the library version
pub fn version() -> &'static str {
    VERSION
}
