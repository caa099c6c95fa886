//! The process-wide canonical provenance record
//!
//! Built once at container-format initialization from the linked library
//! versions and immutable thereafter. Construction is guarded by a
//! [`OnceLock`]: repeat or concurrent initialization returns the record
//! already built, without recomputation. An encoding failure here is a
//! build-time defect in the version strings, not a runtime data condition,
//! and leaves container-format support unavailable.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::codec::encode;
use crate::error::Result;
use crate::record::ProvenanceRecord;

static CANONICAL: OnceLock<ProvenanceRecord> = OnceLock::new();

/// Runtime version triple of the underlying storage-engine library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendVersion {
    pub major: u32,
    pub minor: u32,
    pub release: u32,
}

impl BackendVersion {
    /// Create a version triple
    pub fn new(major: u32, minor: u32, release: u32) -> Self {
        Self {
            major,
            minor,
            release,
        }
    }
}

impl fmt::Display for BackendVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.release)
    }
}

/// Build and install the canonical record for this process
///
/// The writer version is this library's own build version; the backend
/// version comes from the caller's storage-engine query. Idempotent: once a
/// record has been installed, later calls return it unchanged regardless of
/// the triple passed.
pub fn init_canonical_record(backend: BackendVersion) -> Result<&'static ProvenanceRecord> {
    if let Some(record) = CANONICAL.get() {
        return Ok(record);
    }
    let record = build_record(crate::VERSION, &backend.to_string())?;
    // A racing initializer may have won; either record is byte-identical.
    Ok(CANONICAL.get_or_init(|| record))
}

/// The canonical record, if initialization has succeeded
pub fn canonical_record() -> Option<&'static ProvenanceRecord> {
    CANONICAL.get()
}

/// Build a fully encoded record from the two version strings
pub(crate) fn build_record(writer: &str, backend: &str) -> Result<ProvenanceRecord> {
    let mut record = ProvenanceRecord::new(writer, backend);
    record.raw_text = encode(&record)?;
    Ok(record)
}
