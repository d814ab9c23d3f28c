//! Whitespace normalization utilities.
//!
//! [`collapse_whitespace`] uses Unicode's definition of whitespace, so tabs,
//! newlines, carriage returns and non-breaking spaces all count as
//! separators.
//!
//! ```rust
//! use canonical::collapse_whitespace;
//!
//! assert_eq!(collapse_whitespace("  quarterly \t report\r\n"), "quarterly report");
//! ```

/// Collapses every run of whitespace into a single ASCII space and trims the
/// edges.
///
/// Returns an empty string when the input is empty or whitespace-only.
///
/// ```rust
/// use canonical::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("hello\u{00A0}\u{00A0}world"), "hello world");
/// assert_eq!(collapse_whitespace("   \n\t   "), "");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}
