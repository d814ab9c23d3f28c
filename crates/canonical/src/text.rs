//! Free-text sanitization shared by every stage of the pipeline.
//!
//! Upstream extraction output routinely carries stray C0 control characters
//! (form feeds, NULs, escape sequences) that the document writer cannot
//! render. [`normalize_text`] removes them, trims the result, and collapses
//! "nothing left" to `None` so callers never see an empty string.
//!
//! ```rust
//! use canonical::normalize_text;
//!
//! assert_eq!(normalize_text(Some("  \u{0007}본문  ")), Some("본문".to_string()));
//! assert_eq!(normalize_text(Some(" \u{0000} ")), None);
//! assert_eq!(normalize_text(None), None);
//! ```

use std::borrow::Cow;

/// Characters below U+0020 are dropped, except tab, newline and carriage return.
fn is_retained(ch: char) -> bool {
    ch >= '\u{20}' || matches!(ch, '\n' | '\r' | '\t')
}

/// Removes C0 control characters other than `\n`, `\r` and `\t`.
///
/// Borrows the input when nothing needs to be removed.
pub fn strip_control_chars(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_retained) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|ch| is_retained(*ch)).collect())
    }
}

/// Sanitizes and trims free text.
///
/// The result is either `None` or a non-empty, trimmed string that contains
/// no code point below U+0020 other than `\n`, `\r` and `\t`.
pub fn normalize_text(raw: Option<&str>) -> Option<String> {
    let stripped = strip_control_chars(raw?);
    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
