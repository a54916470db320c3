//! String utilities shared by matching and lookup code.

/// Returns `true` if the string is empty or whitespace-only.
///
/// Blank strings never participate in matching: a blank name contributes no
/// candidate term and a blank lookup term never finds an entity.
///
/// # Examples
///
/// ```
/// use storylink_domain::common::is_blank;
///
/// assert!(is_blank(""));
/// assert!(is_blank("  \t\n"));
/// assert!(!is_blank("Elena"));
/// ```
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Converts a blank string to `None`, otherwise returns `Some(value)`.
///
/// # Examples
///
/// ```
/// use storylink_domain::common::none_if_blank;
///
/// assert_eq!(none_if_blank("hello"), Some("hello"));
/// assert_eq!(none_if_blank("   "), None);
/// ```
pub fn none_if_blank(value: &str) -> Option<&str> {
    if is_blank(value) {
        None
    } else {
        Some(value)
    }
}
