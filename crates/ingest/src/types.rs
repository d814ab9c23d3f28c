//! Boundary model for upstream article records.
//!
//! Records arrive as arbitrary JSON produced by an extraction process. Nothing
//! about their shape is trusted: every field is optional and a field of the
//! wrong type is treated as absent. [`RawRecord::from_value`] is the only
//! place that looks at raw JSON; everything downstream works on these typed
//! structs.
//!
//! # Field handling
//!
//! | Field | Accepted | Otherwise |
//! |-------|----------|-----------|
//! | `title`, `content_text` | string | absent |
//! | `article_id`, `id` | string, or number (decimal text) | absent |
//! | `content` | array of objects | empty / element skipped |
//! | `metadata` | object | empty metadata |
//!
//! # Examples
//!
//! ```rust
//! use ingest::{ContentBlock, RawRecord};
//! use serde_json::json;
//!
//! let record = RawRecord::from_value(&json!({
//!     "id": 42,
//!     "title": "공지",
//!     "content": [
//!         { "type": "text", "value": "본문" },
//!         { "type": "image", "url": "a.png" }
//!     ],
//!     "metadata": "corrupted"
//! }))
//! .unwrap();
//!
//! assert_eq!(record.id.as_deref(), Some("42"));
//! assert_eq!(record.content.len(), 2);
//! assert_eq!(record.content[1], ContentBlock::Unrecognized);
//! assert!(record.metadata.is_empty());
//! ```
use serde_json::{Map, Value};

use crate::error::{json_type_name, IngestError};
use crate::metadata::RecordMetadata;

/// One raw article as produced by the upstream extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub title: Option<String>,
    /// Pre-assembled body text; preferred over `content` when usable.
    pub content_text: Option<String>,
    pub content: Vec<ContentBlock>,
    pub metadata: RecordMetadata,
    /// Primary identifier candidate.
    pub article_id: Option<String>,
    /// Secondary identifier candidate.
    pub id: Option<String>,
}

/// A structural unit inside a record's `content` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    /// `{"type": "text", "value": ...}`
    Text { value: Option<String> },
    /// `{"type": "link", "text": ..., "url": ...}`
    ///
    /// `text` falls back to the block's `value` when `text` is missing or
    /// empty.
    Link {
        text: Option<String>,
        url: Option<String>,
    },
    /// Any other block type, or an element that is not an object. Contributes
    /// nothing to the resolved content.
    Unrecognized,
}

impl RawRecord {
    /// Reads a record from an arbitrary JSON value.
    ///
    /// Fails only when the value itself is not an object.
    pub fn from_value(value: &Value) -> Result<Self, IngestError> {
        let Some(obj) = value.as_object() else {
            return Err(IngestError::NotAnObject {
                found: json_type_name(value),
            });
        };

        let content = obj
            .get("content")
            .and_then(Value::as_array)
            .map(|blocks| blocks.iter().map(ContentBlock::from_value).collect())
            .unwrap_or_default();

        Ok(Self {
            title: string_field(obj, "title"),
            content_text: string_field(obj, "content_text"),
            content,
            metadata: RecordMetadata::from_value(obj.get("metadata")),
            article_id: identifier_field(obj, "article_id"),
            id: identifier_field(obj, "id"),
        })
    }

    /// Identifier candidates in priority order.
    pub fn identifier_candidates(&self) -> [Option<&str>; 2] {
        [self.article_id.as_deref(), self.id.as_deref()]
    }
}

impl ContentBlock {
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::Unrecognized;
        };

        match obj.get("type").and_then(Value::as_str) {
            Some("text") => Self::Text {
                value: string_field(obj, "value"),
            },
            Some("link") => Self::Link {
                text: non_empty_string_field(obj, "text")
                    .or_else(|| non_empty_string_field(obj, "value")),
                url: string_field(obj, "url"),
            },
            _ => Self::Unrecognized,
        }
    }
}

pub(crate) fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn non_empty_string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    string_field(obj, key).filter(|value| !value.is_empty())
}

/// Identifiers are commonly emitted as numbers; keep their decimal text.
fn identifier_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(value) => Some(value.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
