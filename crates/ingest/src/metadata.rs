//! Record metadata extraction.
//!
//! Upstream metadata is a free-form mapping. Only three keys matter to the
//! converter: `created_at`, `author` and `department`. Their values are
//! carried verbatim (no sanitization) so the document header shows exactly
//! what the source system recorded.
//!
//! A `metadata` value that is missing, `null`, or not a mapping yields
//! [`RecordMetadata::default`]; malformed metadata never fails a record.
use serde_json::Value;

use crate::types::string_field;

/// The subset of record metadata the converter consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordMetadata {
    /// Source timestamp in whatever format the extractor produced.
    pub created_at: Option<String>,
    pub author: Option<String>,
    pub department: Option<String>,
}

impl RecordMetadata {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_object) {
            Some(obj) => Self {
                created_at: string_field(obj, "created_at"),
                author: string_field(obj, "author"),
                department: string_field(obj, "department"),
            },
            None => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.created_at.is_none() && self.author.is_none() && self.department.is_none()
    }
}
