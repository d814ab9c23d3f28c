//! Canonical article document and the converter envelope around it.
//!
//! A [`CanonicalDocument`] is the normalized form of one upstream record.
//! [`Envelope`] wraps it in the response shape the HWPX converter reads on
//! stdin. Field names on the wire are fixed by the converter and must not
//! change:
//!
//! ```text
//! {
//!   "responseCode": "0",
//!   "responseText": "SUCCESS",
//!   "options": { "includeHeader": bool },
//!   "data": {
//!     "article": {
//!       "atclId": string,
//!       "subject": string,
//!       "contents": [ { "type": "text", "value": string }, ... ],
//!       "regDt": string | null,
//!       "regEmpName": string | null,
//!       "regDeptName": string | null
//!     }
//!   }
//! }
//! ```
//!
//! # Examples
//!
//! ```rust
//! use canonical::{CanonicalDocument, Envelope, TextSegment};
//!
//! let document = CanonicalDocument {
//!     id: "A-1".into(),
//!     subject: "공지".into(),
//!     contents: TextSegment::new("본문").into_iter().collect(),
//!     reg_dt: Some("2024.03.05 오후 02:15:30".into()),
//!     reg_emp_name: None,
//!     reg_dept_name: None,
//!     include_header: true,
//! };
//!
//! let json = Envelope::new(document).to_json_string().unwrap();
//! assert!(json.starts_with(r#"{"responseCode":"0","responseText":"SUCCESS""#));
//! assert!(json.contains(r#""contents":[{"type":"text","value":"본문"}]"#));
//! ```

use serde::Serialize;

use crate::error::CanonicalError;
use crate::text::normalize_text;

/// Response code the converter accepts as "valid input".
pub const RESPONSE_CODE_OK: &str = "0";
/// Response text paired with [`RESPONSE_CODE_OK`].
pub const RESPONSE_TEXT_OK: &str = "SUCCESS";

/// One resolved unit of article content.
///
/// Serializes as `{"type": "text", "value": ...}`. The value is always
/// sanitized and non-empty; the only constructor goes through
/// [`normalize_text`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "text")]
pub struct TextSegment {
    value: String,
}

impl TextSegment {
    /// Builds a segment from raw text, or `None` if nothing survives
    /// sanitization.
    pub fn new(raw: &str) -> Option<Self> {
        normalize_text(Some(raw)).map(|value| Self { value })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn into_value(self) -> String {
        self.value
    }
}

/// Normalized article ready to be handed to the converter.
///
/// `reg_*` fields are carried verbatim from the record metadata; only `id`
/// and `contents` are produced by normalization. `include_header` is not part
/// of the article object on the wire, it travels in the envelope options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalDocument {
    /// Batch-unique article identifier.
    #[serde(rename = "atclId")]
    pub id: String,
    /// Raw title, empty when the record had none.
    pub subject: String,
    pub contents: Vec<TextSegment>,
    pub reg_dt: Option<String>,
    pub reg_emp_name: Option<String>,
    pub reg_dept_name: Option<String>,
    #[serde(skip)]
    pub include_header: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeOptions {
    pub include_header: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvelopeData {
    pub article: CanonicalDocument,
}

/// Converter input envelope around a single [`CanonicalDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub response_code: &'static str,
    pub response_text: &'static str,
    pub options: EnvelopeOptions,
    pub data: EnvelopeData,
}

impl Envelope {
    /// Wraps a document with a success status and its header option.
    pub fn new(article: CanonicalDocument) -> Self {
        Self {
            response_code: RESPONSE_CODE_OK,
            response_text: RESPONSE_TEXT_OK,
            options: EnvelopeOptions {
                include_header: article.include_header,
            },
            data: EnvelopeData { article },
        }
    }

    pub fn article(&self) -> &CanonicalDocument {
        &self.data.article
    }

    pub fn include_header(&self) -> bool {
        self.options.include_header
    }

    /// UTF-8 JSON bytes; non-ASCII text is emitted as-is, not escaped.
    pub fn to_json(&self) -> Result<Vec<u8>, CanonicalError> {
        serde_json::to_vec(self).map_err(|err| CanonicalError::Serialize(err.to_string()))
    }

    pub fn to_json_string(&self) -> Result<String, CanonicalError> {
        serde_json::to_string(self).map_err(|err| CanonicalError::Serialize(err.to_string()))
    }

    pub fn to_value(&self) -> Result<serde_json::Value, CanonicalError> {
        serde_json::to_value(self).map_err(|err| CanonicalError::Serialize(err.to_string()))
    }
}
