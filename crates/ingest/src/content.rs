//! Resolution of a record's body into ordered text segments.
//!
//! Tiers are tried in order and the first that yields anything wins:
//!
//! 1. `content_text`, as a single segment.
//! 2. `content` blocks: `text` blocks contribute their value, `link` blocks
//!    contribute `"{text} ({url})"`, anything else is skipped. Blank results
//!    are dropped, order is preserved.
//! 3. `title`, as a single segment.
//! 4. Nothing: an empty list.
//!
//! ```rust
//! use ingest::{resolve_contents, RawRecord};
//! use serde_json::json;
//!
//! let record = RawRecord::from_value(&json!({
//!     "title": "Release notes",
//!     "content": [
//!         { "type": "text", "value": "Highlights" },
//!         { "type": "link", "text": "Changelog", "url": "https://example.com/log" }
//!     ]
//! }))
//! .unwrap();
//!
//! let segments = resolve_contents(&record);
//! let values: Vec<&str> = segments.iter().map(|s| s.value()).collect();
//! assert_eq!(values, ["Highlights", "Changelog (https://example.com/log)"]);
//! ```
use canonical::TextSegment;
use tracing::trace;

use crate::types::{ContentBlock, RawRecord};

/// Which tier produced a record's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    ContentText,
    Blocks,
    Title,
    Empty,
}

impl ContentSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ContentText => "content_text",
            Self::Blocks => "blocks",
            Self::Title => "title",
            Self::Empty => "empty",
        }
    }
}

/// Resolves a record's content into sanitized, non-empty text segments.
pub fn resolve_contents(record: &RawRecord) -> Vec<TextSegment> {
    resolve_contents_with_source(record).0
}

/// Like [`resolve_contents`], also reporting which tier was used.
pub fn resolve_contents_with_source(record: &RawRecord) -> (Vec<TextSegment>, ContentSource) {
    if let Some(segment) = record.content_text.as_deref().and_then(TextSegment::new) {
        return (vec![segment], ContentSource::ContentText);
    }

    let from_blocks: Vec<TextSegment> = record
        .content
        .iter()
        .filter_map(block_text)
        .filter_map(|text| TextSegment::new(&text))
        .collect();
    if !from_blocks.is_empty() {
        return (from_blocks, ContentSource::Blocks);
    }

    if let Some(segment) = record.title.as_deref().and_then(TextSegment::new) {
        trace!("content_fallback_title");
        return (vec![segment], ContentSource::Title);
    }

    (Vec::new(), ContentSource::Empty)
}

/// Raw display text of a single block, before sanitization.
fn block_text(block: &ContentBlock) -> Option<String> {
    match block {
        ContentBlock::Text { value } => value.clone(),
        ContentBlock::Link { text, url } => Some(
            format!(
                "{} ({})",
                text.as_deref().unwrap_or_default(),
                url.as_deref().unwrap_or_default()
            )
            .trim()
            .to_string(),
        ),
        ContentBlock::Unrecognized => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(value: serde_json::Value) -> RawRecord {
        RawRecord::from_value(&value).expect("object record")
    }

    fn values(segments: &[TextSegment]) -> Vec<&str> {
        segments.iter().map(TextSegment::value).collect()
    }

    #[test]
    fn content_text_wins_over_everything() {
        let record = record(json!({
            "content_text": "  hello  ",
            "content": [{ "type": "text", "value": "block" }],
            "title": "title"
        }));
        let (segments, source) = resolve_contents_with_source(&record);
        assert_eq!(values(&segments), ["hello"]);
        assert_eq!(source, ContentSource::ContentText);
    }

    #[test]
    fn blocks_used_when_content_text_is_blank() {
        let record = record(json!({
            "content_text": " \u{0000}\n ",
            "content": [
                { "type": "text", "value": "first" },
                { "type": "image", "url": "x.png" },
                { "type": "text", "value": "   " },
                { "type": "text" },
                { "type": "link", "text": "site", "url": "https://a.example" },
                { "type": "text", "value": "\u{0007}last" }
            ],
            "title": "title"
        }));
        let (segments, source) = resolve_contents_with_source(&record);
        assert_eq!(
            values(&segments),
            ["first", "site (https://a.example)", "last"]
        );
        assert_eq!(source, ContentSource::Blocks);
    }

    #[test]
    fn link_with_missing_parts() {
        let record = record(json!({
            "content": [
                { "type": "link", "url": "https://only-url.example" },
                { "type": "link", "text": "only text" },
                { "type": "link" }
            ]
        }));
        // An entirely empty link still renders its parentheses.
        assert_eq!(
            values(&resolve_contents(&record)),
            ["(https://only-url.example)", "only text ()", "()"]
        );
    }

    #[test]
    fn title_is_the_last_resort() {
        let record = record(json!({
            "content_text": "",
            "title": "My Title"
        }));
        let (segments, source) = resolve_contents_with_source(&record);
        assert_eq!(values(&segments), ["My Title"]);
        assert_eq!(source, ContentSource::Title);
    }

    #[test]
    fn title_fallback_when_all_blocks_are_blank() {
        let record = record(json!({
            "content": [{ "type": "text", "value": " " }, { "type": "video" }],
            "title": "  제목  "
        }));
        assert_eq!(values(&resolve_contents(&record)), ["제목"]);
    }

    #[test]
    fn nothing_usable_yields_empty() {
        let record = record(json!({
            "content_text": "   ",
            "content": [{ "type": "unknown", "value": "ignored" }],
            "title": "\u{0001}"
        }));
        let (segments, source) = resolve_contents_with_source(&record);
        assert!(segments.is_empty());
        assert_eq!(source, ContentSource::Empty);
        assert!(resolve_contents(&RawRecord::default()).is_empty());
    }
}
