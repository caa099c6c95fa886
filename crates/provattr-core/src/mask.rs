//! Enumeration mask hiding the provenance attribute from ordinary listings
//!
//! When present, the provenance attribute occupies slot zero of the root
//! namespace; the surrounding system writes it first at creation time and
//! this module does no re-ordering of its own. Both functions take
//! `has_attribute` explicitly and must be applied at every boundary that
//! reports or consumes a global-attribute ordinal. When the attribute has
//! been renamed or deleted, `has_attribute` is false and masking is a no-op.

/// Number of attributes visible to callers
pub fn count_visible(actual_count: usize, has_attribute: bool) -> usize {
    if has_attribute {
        // Saturating: a zero actual count with the flag set means the caller's
        // count is already wrong; degrade rather than panic.
        actual_count.saturating_sub(1)
    } else {
        actual_count
    }
}

/// Actual slot backing a caller-visible attribute index
pub fn translate_index(requested_visible_index: usize, has_attribute: bool) -> usize {
    if has_attribute {
        requested_visible_index + 1
    } else {
        requested_visible_index
    }
}
