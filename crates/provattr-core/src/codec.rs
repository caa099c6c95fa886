//! Encoding and decoding of the flat provenance text
//!
//! The encoded form is `key=value` pairs joined by [`PROV_SEPARATOR`], with
//! no trailing separator. The revision key is always encoded first so that
//! readers may short-circuit on an unknown revision. Decoding is total over
//! well-formed input and all-or-nothing: a single malformed segment rejects
//! the whole document, never a partially populated record.

use crate::error::{CodecError, Result};
use crate::record::{
    ProvenanceRecord, KEY_BACKEND_LIB, KEY_CONTAINER_LIB, KEY_VERSION, PROV_ATTR_LENGTH,
    PROV_MAX_FIELD, PROV_SEPARATOR,
};

/// Encode a record into its flat text form
///
/// Fails with [`CodecError::TooLarge`] when the text, plus one reserved
/// terminator byte, exceeds the fixed attribute width. A separator
/// character inside a field value is a caller bug; the encoder does not
/// escape it.
pub fn encode(record: &ProvenanceRecord) -> Result<String> {
    debug_assert!(
        !record.writer_lib_version.contains(PROV_SEPARATOR)
            && !record.backend_lib_version.contains(PROV_SEPARATOR),
        "separator character is not permitted inside a field value"
    );

    let text = format!(
        "{}={}{sep}{}={}{sep}{}={}",
        KEY_VERSION,
        record.version,
        KEY_CONTAINER_LIB,
        record.writer_lib_version,
        KEY_BACKEND_LIB,
        record.backend_lib_version,
        sep = PROV_SEPARATOR,
    );

    // One byte reserved for the terminator of the fixed-width attribute.
    let needed = text.len() + 1;
    if needed > PROV_ATTR_LENGTH {
        return Err(CodecError::TooLarge {
            needed,
            limit: PROV_ATTR_LENGTH,
        });
    }

    Ok(text)
}

/// Decode a flat text into a record
///
/// Unrecognized keys are ignored; a recognized key appearing more than once
/// keeps its last occurrence. The revision value is clamped to 0 when
/// negative or unparsable. The empty string decodes to the zero record.
/// Any segment without an `=` fails the whole document with
/// [`CodecError::MalformedRecord`].
pub fn decode(text: &str) -> Result<ProvenanceRecord> {
    let mut record = ProvenanceRecord::zero();
    if text.is_empty() {
        return Ok(record);
    }

    for segment in text.split(PROV_SEPARATOR) {
        let Some((name, value)) = segment.split_once('=') else {
            return Err(CodecError::MalformedRecord(format!(
                "segment without '=': {segment:?}"
            )));
        };
        match name {
            KEY_VERSION => record.version = parse_revision(value),
            KEY_CONTAINER_LIB => record.writer_lib_version = bounded(value),
            KEY_BACKEND_LIB => record.backend_lib_version = bounded(value),
            // Unknown keys come from newer writers; ignore them.
            _ => {}
        }
    }

    record.raw_text = text.to_owned();
    Ok(record)
}

/// Parse the revision value, clamping negative or unparsable input to 0
fn parse_revision(value: &str) -> u32 {
    match value.parse::<i64>() {
        Ok(v) if v > 0 => u32::try_from(v).unwrap_or(0),
        _ => 0,
    }
}

/// Truncate a field value to its fixed bound, at a character boundary
fn bounded(value: &str) -> String {
    if value.len() <= PROV_MAX_FIELD {
        return value.to_owned();
    }
    let mut end = PROV_MAX_FIELD;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    value[..end].to_owned()
}
