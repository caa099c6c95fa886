//! The Attribute Bridge: provenance reads and writes through the store
//!
//! The bridge connects the pure record codec to an open root namespace of
//! the object-attribute store. The read path never fails a file open over
//! provenance: absent, foreign-shaped, and malformed attributes all degrade
//! to "no provenance recorded". The write path is non-destructive: an
//! existing attribute under the reserved name is never overwritten.

use tracing::{debug, info, warn};

use provattr_core::{
    count_visible, decode, encode, init_canonical_record, translate_index, ProvenanceRecord,
    PROV_ATTR_LENGTH, PROV_ATTR_NAME,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::{AttributeStore, AttributeType};

/// Provenance view of one open file handle
///
/// Owned exclusively by the handle; populated once at open or create time
/// and never shared across handles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileProvenanceState {
    has_attribute: bool,
    degraded: bool,
    record: ProvenanceRecord,
}

impl FileProvenanceState {
    /// State for a file with no provenance attribute
    pub fn absent() -> Self {
        Self::default()
    }

    /// Whether slot zero of the root namespace holds the provenance
    /// attribute; this is what the enumeration mask consults
    pub fn has_attribute(&self) -> bool {
        self.has_attribute
    }

    /// Whether an attribute was present but its text failed to parse
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// The decoded record; the zero record when absent or degraded
    pub fn record(&self) -> &ProvenanceRecord {
        &self.record
    }

    /// The record, if a well-formed one was read
    ///
    /// `None` covers every "unavailable" case: attribute absent, foreign
    /// shape, or unparsable text.
    pub fn provenance(&self) -> Option<&ProvenanceRecord> {
        if self.has_attribute && !self.degraded && !self.record.is_zero() {
            Some(&self.record)
        } else {
            None
        }
    }
}

/// Read the provenance attribute from an open root namespace
///
/// Absent attribute: normal outcome, zero record. Present but not a
/// fixed-width text of exactly the reserved length: written by an unrelated
/// tool, ignored like absent. Present and well-typed but unparsable:
/// degraded state, file stays usable. Store failures propagate unchanged.
pub fn read_provenance(store: &impl AttributeStore) -> Result<FileProvenanceState> {
    let Some(ty) = store.attribute_type(PROV_ATTR_NAME)? else {
        debug!(attribute = PROV_ATTR_NAME, "no provenance attribute");
        return Ok(FileProvenanceState::absent());
    };

    let expected = AttributeType::FixedText {
        len: PROV_ATTR_LENGTH,
    };
    if ty != expected {
        warn!(
            attribute = PROV_ATTR_NAME,
            shape = ?ty,
            "foreign provenance attribute shape; ignoring"
        );
        return Ok(FileProvenanceState::absent());
    }

    let bytes = store.read_attribute(PROV_ATTR_NAME)?;
    let text = match fixed_text(&bytes) {
        Some(text) => text,
        None => {
            warn!(
                attribute = PROV_ATTR_NAME,
                "provenance attribute is not valid UTF-8; degrading"
            );
            return Ok(degraded());
        }
    };

    match decode(text) {
        Ok(record) => {
            info!(
                revision = record.revision(),
                writer = record.writer_lib_version(),
                backend = record.backend_lib_version(),
                "decoded provenance attribute"
            );
            Ok(FileProvenanceState {
                has_attribute: true,
                degraded: false,
                record,
            })
        }
        Err(err) => {
            warn!(error = %err, "malformed provenance attribute; degrading");
            Ok(degraded())
        }
    }
}

/// Write a provenance attribute into a newly created root namespace
///
/// Non-destructive by contract: if the attribute already exists the call is
/// a no-op and succeeds. Otherwise the record is encoded and stored as a
/// fixed-width text attribute, padded with NUL to exactly the reserved
/// length. Only the file-creation path of the surrounding system calls
/// this, before any other global attribute is added.
pub fn write_provenance(
    store: &mut impl AttributeStore,
    record: &ProvenanceRecord,
) -> Result<()> {
    if store.attribute_type(PROV_ATTR_NAME)?.is_some() {
        debug!(
            attribute = PROV_ATTR_NAME,
            "provenance attribute already present; write is a no-op"
        );
        return Ok(());
    }

    let mut bytes = encode(record)?.into_bytes();
    bytes.resize(PROV_ATTR_LENGTH, 0);
    store.create_fixed_text_attribute(PROV_ATTR_NAME, PROV_ATTR_LENGTH, &bytes)?;
    info!(
        attribute = PROV_ATTR_NAME,
        revision = record.revision(),
        "wrote provenance attribute"
    );
    Ok(())
}

/// Stamp a newly created file with this process's canonical record
///
/// Builds the canonical record on first use, from the store's backend
/// version; a [`provattr_core::CodecError::TooLarge`] here means
/// container-format support is unavailable for the process.
pub fn write_canonical_provenance(store: &mut impl AttributeStore) -> Result<FileProvenanceState> {
    let record = init_canonical_record(store.backend_version())?;
    write_provenance(store, record)?;
    Ok(FileProvenanceState {
        has_attribute: true,
        degraded: false,
        record: record.clone(),
    })
}

/// Number of attributes a caller sees in this namespace
pub fn visible_attribute_count(
    store: &impl AttributeStore,
    state: &FileProvenanceState,
) -> Result<usize> {
    Ok(count_visible(
        store.attribute_count()?,
        state.has_attribute(),
    ))
}

/// Name of the attribute at a caller-visible index
pub fn visible_attribute_name(
    store: &impl AttributeStore,
    state: &FileProvenanceState,
    index: usize,
) -> Result<String> {
    let actual = translate_index(index, state.has_attribute());
    Ok(store.attribute_name(actual)?)
}

/// File-level metadata reported alongside the provenance record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// On-disk superblock revision of the container file
    pub superblock_version: u32,

    /// Whether the file appears to have been created by the container
    /// library, judged by a well-formed provenance record
    pub created_by_container_lib: bool,
}

/// Gather file-level metadata for diagnostic reporting
///
/// A store failure degrades the superblock revision to 0 rather than
/// failing the query.
pub fn read_file_info(store: &impl AttributeStore, state: &FileProvenanceState) -> FileInfo {
    let superblock_version = match store.superblock_version() {
        Ok(v) => v,
        Err(err) => {
            warn!(error = %err, "superblock version unavailable; reporting 0");
            0
        }
    };
    FileInfo {
        superblock_version,
        created_by_container_lib: state.provenance().is_some(),
    }
}

/// Degraded state: attribute present at slot zero but unusable
fn degraded() -> FileProvenanceState {
    FileProvenanceState {
        has_attribute: true,
        degraded: true,
        record: ProvenanceRecord::zero(),
    }
}

/// Text portion of a fixed-width attribute value, up to the first NUL
fn fixed_text(bytes: &[u8]) -> Option<&str> {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    std::str::from_utf8(&bytes[..end]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use provattr_core::BackendVersion;

    fn store() -> MemoryStore {
        MemoryStore::new(BackendVersion::new(1, 8, 17))
    }

    fn record() -> ProvenanceRecord {
        ProvenanceRecord::new("4.4.0", "1.8.17")
    }

    #[test]
    fn test_read_absent_attribute() {
        let state = read_provenance(&store()).unwrap();
        assert!(!state.has_attribute());
        assert!(!state.is_degraded());
        assert!(state.record().is_zero());
        assert!(state.provenance().is_none());
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let mut store = store();
        write_provenance(&mut store, &record()).unwrap();

        let state = read_provenance(&store).unwrap();
        assert!(state.has_attribute());
        let read = state.provenance().unwrap();
        assert_eq!(read.writer_lib_version(), "4.4.0");
        assert_eq!(read.backend_lib_version(), "1.8.17");
    }

    #[test]
    fn test_write_is_non_destructive() {
        let mut store = store();
        write_provenance(&mut store, &record()).unwrap();
        let first = store.read_attribute(PROV_ATTR_NAME).unwrap();

        // Second write with different content must be a silent no-op.
        let other = ProvenanceRecord::new("9.9.9", "9.9.9");
        write_provenance(&mut store, &other).unwrap();
        assert_eq!(store.read_attribute(PROV_ATTR_NAME).unwrap(), first);
    }

    #[test]
    fn test_written_attribute_is_exact_width() {
        let mut store = store();
        write_provenance(&mut store, &record()).unwrap();
        let bytes = store.read_attribute(PROV_ATTR_NAME).unwrap();
        assert_eq!(bytes.len(), PROV_ATTR_LENGTH);
        assert_eq!(
            store.attribute_type(PROV_ATTR_NAME).unwrap(),
            Some(AttributeType::FixedText {
                len: PROV_ATTR_LENGTH
            })
        );
    }

    #[test]
    fn test_integer_attribute_is_foreign() {
        let mut store = store();
        store.put_integer_attribute(PROV_ATTR_NAME, 42);

        let state = read_provenance(&store).unwrap();
        assert!(!state.has_attribute());
        assert!(state.record().is_zero());
    }

    #[test]
    fn test_wrong_width_text_is_foreign() {
        let mut store = store();
        store
            .create_fixed_text_attribute(PROV_ATTR_NAME, 16, b"version=1\0\0\0\0\0\0\0")
            .unwrap();

        let state = read_provenance(&store).unwrap();
        assert!(!state.has_attribute());
    }

    #[test]
    fn test_malformed_text_degrades() {
        let mut store = store();
        let mut bytes = b"not pairs at all".to_vec();
        bytes.resize(PROV_ATTR_LENGTH, 0);
        store
            .create_fixed_text_attribute(PROV_ATTR_NAME, PROV_ATTR_LENGTH, &bytes)
            .unwrap();

        let state = read_provenance(&store).unwrap();
        assert!(state.has_attribute());
        assert!(state.is_degraded());
        assert!(state.record().is_zero());
        assert!(state.provenance().is_none());
    }

    #[test]
    fn test_invalid_utf8_degrades() {
        let mut store = store();
        let mut bytes = vec![0xFFu8, 0xFE, b'='];
        bytes.resize(PROV_ATTR_LENGTH, 0);
        store
            .create_fixed_text_attribute(PROV_ATTR_NAME, PROV_ATTR_LENGTH, &bytes)
            .unwrap();

        let state = read_provenance(&store).unwrap();
        assert!(state.is_degraded());
    }

    #[test]
    fn test_empty_text_is_zero_record_not_degraded() {
        let mut store = store();
        store
            .create_fixed_text_attribute(PROV_ATTR_NAME, PROV_ATTR_LENGTH, &[0; PROV_ATTR_LENGTH])
            .unwrap();

        let state = read_provenance(&store).unwrap();
        assert!(state.has_attribute());
        assert!(!state.is_degraded());
        assert!(state.record().is_zero());
        // Zero record still reports "unavailable" to provenance queries.
        assert!(state.provenance().is_none());
    }

    #[test]
    fn test_file_info_reflects_provenance() {
        let mut store = store().with_superblock_version(2);
        let state = read_provenance(&store).unwrap();
        let info = read_file_info(&store, &state);
        assert_eq!(info.superblock_version, 2);
        assert!(!info.created_by_container_lib);

        write_provenance(&mut store, &record()).unwrap();
        let state = read_provenance(&store).unwrap();
        let info = read_file_info(&store, &state);
        assert!(info.created_by_container_lib);
    }

    #[test]
    fn test_state_serializes_for_diagnostics() {
        let mut store = store();
        write_provenance(&mut store, &record()).unwrap();
        let state = read_provenance(&store).unwrap();
        let info = read_file_info(&store, &state);

        let json = serde_json::to_value((&state, &info)).unwrap();
        assert_eq!(json[0]["has_attribute"], true);
        assert_eq!(json[1]["created_by_container_lib"], true);
    }

    #[test]
    fn test_fixed_text_stops_at_nul() {
        assert_eq!(fixed_text(b"abc\0def"), Some("abc"));
        assert_eq!(fixed_text(b"abc"), Some("abc"));
        assert_eq!(fixed_text(b"\0"), Some(""));
    }
}
