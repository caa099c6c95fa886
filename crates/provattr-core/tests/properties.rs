//! Property-Based Tests for the record codec and enumeration mask
//!
//! These tests verify the codec and masking contracts for arbitrary inputs:
//! 1. ROUND-TRIP: decode(encode(r)) reproduces every recognized field
//! 2. TOTALITY: decode never panics; failure always yields MalformedRecord
//! 3. MASKING: count/index adjustment is consistent and order-preserving
//!
//! Uses proptest for property-based testing with arbitrary inputs.

use proptest::prelude::*;
use provattr_core::{
    count_visible, decode, encode, translate_index, CodecError, ProvenanceRecord,
    PROV_MAX_FIELD,
};

/// Printable, separator-free field values within the fixed field bound
fn field_value() -> impl Strategy<Value = String> {
    "[0-9A-Za-z .+_-]{0,64}"
}

proptest! {
    /// Round-trip: every recognized field survives encode then decode
    #[test]
    fn prop_round_trip(
        writer in field_value(),
        backend in field_value(),
    ) {
        let mut record = ProvenanceRecord::new(writer, backend);
        let text = encode(&record).expect("bounded fields must encode");
        record.raw_text = text.clone();

        let decoded = decode(&text).expect("encoded text must decode");
        prop_assert_eq!(decoded, record);
    }

    /// Decoding is total: arbitrary input either decodes or reports
    /// MalformedRecord, never panics
    #[test]
    fn prop_decode_never_panics(text in ".{0,512}") {
        match decode(&text) {
            Ok(record) => {
                // A decoded record is bounded and self-consistent.
                prop_assert!(record.writer_lib_version().len() <= PROV_MAX_FIELD);
                prop_assert!(record.backend_lib_version().len() <= PROV_MAX_FIELD);
                prop_assert_eq!(record.raw_text().is_empty(), text.is_empty());
            }
            Err(CodecError::MalformedRecord(_)) => {}
            Err(other) => prop_assert!(false, "unexpected decode error: {other}"),
        }
    }

    /// Segments without '=' always reject the whole document
    #[test]
    fn prop_bare_segment_is_malformed(
        prefix in field_value(),
        bare in "[a-z0-9]{1,16}",
    ) {
        let text = format!("containerlibversion={prefix}|{bare}");
        prop_assert!(matches!(
            decode(&text),
            Err(CodecError::MalformedRecord(_))
        ));
    }

    /// Masking: every visible index maps to a distinct actual slot that is
    /// within the actual count, and slot zero is never exposed
    #[test]
    fn prop_mask_is_order_preserving_injection(
        actual in 1..100usize,
        has_attribute in any::<bool>(),
    ) {
        let visible = count_visible(actual, has_attribute);
        if has_attribute {
            prop_assert_eq!(visible, actual - 1);
        } else {
            prop_assert_eq!(visible, actual);
        }

        for i in 0..visible {
            let slot = translate_index(i, has_attribute);
            prop_assert!(slot < actual);
            if has_attribute {
                prop_assert!(slot != 0, "slot zero must stay hidden");
            }
            if i > 0 {
                prop_assert_eq!(slot, translate_index(i - 1, has_attribute) + 1);
            }
        }
    }
}
