//! Error types produced by the ingest crate.
//!
//! Most irregularities in upstream records are not errors at all: missing
//! fields, non-mapping metadata, unknown content block types and unparsable
//! dates all degrade to documented defaults. What remains is a batch element
//! that is not an object, and a date configuration that cannot work.
use thiserror::Error;

/// Errors that can occur while reading upstream records.
///
/// ```rust
/// use ingest::IngestError;
///
/// let err = IngestError::NotAnObject { found: "array" };
/// assert_eq!(err.to_string(), "record is not a JSON object (found array)");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IngestError {
    /// A batch element was not a JSON object.
    #[error("record is not a JSON object (found {found})")]
    NotAnObject { found: &'static str },

    /// The date substitution table or pattern list is unusable.
    #[error("invalid date configuration: {0}")]
    InvalidDateConfig(String),
}

/// JSON type name used in error messages.
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
