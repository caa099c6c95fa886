//! The object-attribute store boundary
//!
//! The container's binary storage engine is an external collaborator; this
//! module defines the narrow trait the bridge consumes, scoped to one open
//! root namespace, plus an in-memory implementation used by tests. Attribute
//! handles from the underlying engine are closed by ownership; the trait
//! exposes no explicit close.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use provattr_core::BackendVersion;

/// Result type for attribute-store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors raised by the underlying attribute store
///
/// The bridge propagates these unchanged; it never reinterprets a store
/// failure as a provenance condition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Named attribute does not exist
    #[error("no such attribute: {0}")]
    NotFound(String),

    /// Attribute name already exists in this namespace
    #[error("attribute name already in use: {0}")]
    NameInUse(String),

    /// Storage-engine failure
    #[error("attribute store failure: {0}")]
    Backend(String),
}

/// Stored shape of an attribute, as reported by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeType {
    /// Fixed-width text of the given byte length
    FixedText { len: usize },
    /// Integer-valued attribute
    Integer,
    /// Floating-point attribute
    Float,
    /// Anything else the engine can store
    Opaque,
}

/// One open root namespace of an object-attribute store
///
/// Implementations provide their own locking discipline; the bridge adds no
/// synchronization of its own.
pub trait AttributeStore {
    /// Stored type of the named attribute, or `None` if absent
    fn attribute_type(&self, name: &str) -> StoreResult<Option<AttributeType>>;

    /// Raw bytes of the named attribute
    fn read_attribute(&self, name: &str) -> StoreResult<Vec<u8>>;

    /// Create a fixed-width text attribute holding `value`
    ///
    /// `value` must already be exactly `len` bytes; the store does no
    /// padding of its own.
    fn create_fixed_text_attribute(
        &mut self,
        name: &str,
        len: usize,
        value: &[u8],
    ) -> StoreResult<()>;

    /// Number of attributes in this namespace, hidden ones included
    fn attribute_count(&self) -> StoreResult<usize>;

    /// Name of the attribute at the given slot, in creation order
    fn attribute_name(&self, index: usize) -> StoreResult<String>;

    /// Runtime version triple of the storage-engine library
    fn backend_version(&self) -> BackendVersion;

    /// On-disk superblock revision of the containing file
    fn superblock_version(&self) -> StoreResult<u32>;
}

/// In-memory attribute store preserving creation order
///
/// Backs the bridge tests; also a reference for what the bridge expects of
/// a real storage engine.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    attributes: HashMap<String, (AttributeType, Vec<u8>)>,
    order: Vec<String>,
    backend_version: BackendVersion,
    superblock_version: u32,
}

impl MemoryStore {
    /// Create an empty store reporting the given engine version
    pub fn new(backend_version: BackendVersion) -> Self {
        Self {
            attributes: HashMap::new(),
            order: Vec::new(),
            backend_version,
            superblock_version: 0,
        }
    }

    /// Set the superblock revision the store reports
    pub fn with_superblock_version(mut self, version: u32) -> Self {
        self.superblock_version = version;
        self
    }

    /// Insert an attribute of any shape, in creation order
    pub fn put_attribute(&mut self, name: &str, ty: AttributeType, value: Vec<u8>) {
        if self.attributes.insert(name.to_owned(), (ty, value)).is_none() {
            self.order.push(name.to_owned());
        }
    }

    /// Insert an integer attribute (a foreign shape for the provenance name)
    pub fn put_integer_attribute(&mut self, name: &str, value: i64) {
        self.put_attribute(name, AttributeType::Integer, value.to_le_bytes().to_vec());
    }

    /// Remove an attribute by name
    pub fn delete_attribute(&mut self, name: &str) -> bool {
        if self.attributes.remove(name).is_some() {
            self.order.retain(|n| n != name);
            true
        } else {
            false
        }
    }

    /// Rename an attribute, keeping its slot
    pub fn rename_attribute(&mut self, from: &str, to: &str) -> bool {
        match self.attributes.remove(from) {
            Some(entry) => {
                self.attributes.insert(to.to_owned(), entry);
                for name in &mut self.order {
                    if name == from {
                        *name = to.to_owned();
                    }
                }
                true
            }
            None => false,
        }
    }
}

impl AttributeStore for MemoryStore {
    fn attribute_type(&self, name: &str) -> StoreResult<Option<AttributeType>> {
        Ok(self.attributes.get(name).map(|(ty, _)| *ty))
    }

    fn read_attribute(&self, name: &str) -> StoreResult<Vec<u8>> {
        self.attributes
            .get(name)
            .map(|(_, value)| value.clone())
            .ok_or_else(|| StoreError::NotFound(name.to_owned()))
    }

    fn create_fixed_text_attribute(
        &mut self,
        name: &str,
        len: usize,
        value: &[u8],
    ) -> StoreResult<()> {
        if self.attributes.contains_key(name) {
            return Err(StoreError::NameInUse(name.to_owned()));
        }
        if value.len() != len {
            return Err(StoreError::Backend(format!(
                "fixed text length mismatch: {} != {}",
                value.len(),
                len
            )));
        }
        self.put_attribute(name, AttributeType::FixedText { len }, value.to_vec());
        Ok(())
    }

    fn attribute_count(&self) -> StoreResult<usize> {
        Ok(self.order.len())
    }

    fn attribute_name(&self, index: usize) -> StoreResult<String> {
        self.order
            .get(index)
            .cloned()
            .ok_or_else(|| StoreError::Backend(format!("attribute index out of range: {index}")))
    }

    fn backend_version(&self) -> BackendVersion {
        self.backend_version
    }

    fn superblock_version(&self) -> StoreResult<u32> {
        Ok(self.superblock_version)
    }
}
