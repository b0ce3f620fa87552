//! Membership and removal helpers over ordered string lists
//!
//! Used for finalizer lists and plugin-name bookkeeping, where relative
//! order is meaningful and duplicates can occur.

/// Returns true if `value` occurs at least once in `list`.
pub fn contains(list: &[String], value: &str) -> bool {
    list.iter().any(|v| v == value)
}

/// Returns `list` with every occurrence of `value` removed, preserving the
/// relative order of the remaining elements.
///
/// Builds a fresh vector rather than removing in place: in-place removal
/// while iterating skips the element following each removed one, which
/// loses adjacent duplicates.
pub fn remove_all(list: &[String], value: &str) -> Vec<String> {
    list.iter()
        .filter(|v| v.as_str() != value)
        .cloned()
        .collect()
}
