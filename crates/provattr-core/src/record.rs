//! The provenance record and its on-disk format constants
//!
//! A container file written by this library carries a reserved attribute on
//! its root namespace recording which library versions produced it. The
//! attribute value is a flat `key=value|key=value` text of fixed width.

use serde::{Deserialize, Serialize};

/// Reserved name of the provenance attribute on the root namespace
pub const PROV_ATTR_NAME: &str = "_Provenance";

/// Current revision of the record encoding
pub const PROV_FORMAT_VERSION: u32 = 1;

/// Separator between `key=value` pairs; never legal inside a value
pub const PROV_SEPARATOR: char = '|';

/// Fixed byte width of the stored attribute, including one terminator byte
pub const PROV_ATTR_LENGTH: usize = 8192;

/// Upper bound on a single version-string field
pub const PROV_MAX_FIELD: usize = 256;

/// Key carrying the encoding revision; always encoded first so readers can
/// short-circuit on an unknown revision
pub const KEY_VERSION: &str = "version";

/// Key carrying the container-format library version
pub const KEY_CONTAINER_LIB: &str = "containerlibversion";

/// Key carrying the underlying storage-engine library version
pub const KEY_BACKEND_LIB: &str = "backendlibversion";

/// A decoded provenance record
///
/// The zero record (`version == 0`, empty fields) means "no provenance
/// recorded" and is the degraded form every read-path failure falls back to.
/// `raw_text` always holds the text of the last successful encode or decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenanceRecord {
    /// Revision of the encoding format; 0 means no record
    pub version: u32,

    /// Version string of the container-format library that wrote the file
    pub writer_lib_version: String,

    /// Version string of the underlying storage-engine library
    pub backend_lib_version: String,

    /// Full encoded form of the record
    pub raw_text: String,
}

impl ProvenanceRecord {
    /// Create a record from its two version strings, at the current revision
    pub fn new(
        writer_lib_version: impl Into<String>,
        backend_lib_version: impl Into<String>,
    ) -> Self {
        Self {
            version: PROV_FORMAT_VERSION,
            writer_lib_version: writer_lib_version.into(),
            backend_lib_version: backend_lib_version.into(),
            raw_text: String::new(),
        }
    }

    /// The all-zero record: no provenance recorded
    pub fn zero() -> Self {
        Self::default()
    }

    /// Whether this is the zero record
    pub fn is_zero(&self) -> bool {
        self.version == 0
    }

    /// Revision of the encoding format
    pub fn revision(&self) -> u32 {
        self.version
    }

    /// Version string of the writing container-format library
    pub fn writer_lib_version(&self) -> &str {
        &self.writer_lib_version
    }

    /// Version string of the storage-engine library
    pub fn backend_lib_version(&self) -> &str {
        &self.backend_lib_version
    }

    /// The full encoded text of the last successful encode/decode
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_record() {
        let record = ProvenanceRecord::zero();
        assert!(record.is_zero());
        assert_eq!(record.revision(), 0);
        assert!(record.writer_lib_version().is_empty());
        assert!(record.backend_lib_version().is_empty());
        assert!(record.raw_text().is_empty());
    }

    #[test]
    fn test_record_serializes_for_diagnostics() {
        let record = ProvenanceRecord::new("4.4.0", "1.8.17");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["writer_lib_version"], "4.4.0");
    }

    #[test]
    fn test_new_record_uses_current_revision() {
        let record = ProvenanceRecord::new("4.4.0", "1.8.17");
        assert!(!record.is_zero());
        assert_eq!(record.revision(), PROV_FORMAT_VERSION);
        assert_eq!(record.writer_lib_version(), "4.4.0");
        assert_eq!(record.backend_lib_version(), "1.8.17");
    }
}
