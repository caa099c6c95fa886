//! # Provattr Bridge
//!
//! The Attribute Bridge reads and writes the container provenance attribute
//! through an object-attribute store, and applies the enumeration mask at
//! the boundary where attribute ordinals are reported to callers.
//!
//! ## Architecture
//!
//! The storage engine is behind the [`AttributeStore`] trait, scoped to one
//! open root namespace. On file creation the surrounding system calls
//! [`write_canonical_provenance`] before adding any other global attribute,
//! so the provenance attribute lands at slot zero. On file open,
//! [`read_provenance`] produces the handle's [`FileProvenanceState`];
//! enumeration call sites then go through [`visible_attribute_count`] and
//! [`visible_attribute_name`], which hide slot zero when the attribute is
//! present.
//!
//! ## Degradation
//!
//! No read-path condition fails a file open: an absent attribute, a foreign
//! shape under the reserved name, and unparsable text all degrade to "no
//! provenance recorded". Only store-layer failures propagate, unchanged.

pub mod bridge;
pub mod error;
pub mod store;

pub use bridge::{
    read_file_info, read_provenance, visible_attribute_count, visible_attribute_name,
    write_canonical_provenance, write_provenance, FileInfo, FileProvenanceState,
};
pub use error::{BridgeError, Result};
pub use store::{AttributeStore, AttributeType, MemoryStore, StoreError, StoreResult};
