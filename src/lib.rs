//! Workspace umbrella crate for the HWPX batch converter.
//!
//! This crate stitches together record ingest, canonical document building
//! and batch-scoped name allocation, then hands each document to an
//! external converter. Callers can drive a whole run with [`run_batch`] or
//! transform single records with [`transform`].
//!
//! ```rust
//! use hwpx_batch::{transform, AllocationContext, Envelope, RawRecord, TransformOptions};
//! use serde_json::json;
//!
//! let record = RawRecord::from_value(&json!({
//!     "id": 42,
//!     "title": "주간 보고",
//!     "content": [
//!         { "type": "text", "value": "  첫 문단  " },
//!         { "type": "link", "text": "자료", "url": "https://example.com/a" }
//!     ],
//!     "metadata": { "created_at": "2024.03.05 오후 02:15:30", "author": "홍길동" }
//! }))
//! .unwrap();
//!
//! let mut ctx = AllocationContext::new();
//! let out = transform(&record, &TransformOptions::default(), &mut ctx);
//! assert_eq!(out.basename, "42");
//!
//! let envelope = Envelope::new(out.document);
//! assert_eq!(envelope.article().contents[1].value(), "자료 (https://example.com/a)");
//! ```

pub use canonical::{
    collapse_whitespace, normalize_text, strip_control_chars, CanonicalDocument, CanonicalError,
    Envelope, TextSegment,
};
pub use ingest::{
    parse_created_date, resolve_contents, ContentBlock, ContentSource, DateConfig, IngestError,
    RawRecord, RecordMetadata,
};

pub mod allocate;
pub mod batch;
pub mod cli;
pub mod config;
pub mod converter;
pub mod logging;
pub mod transform;

pub use crate::allocate::{
    compose_title_date, sanitize_filename_component, AllocationContext, FALLBACK_BASENAME,
    SYNTHETIC_ID_PREFIX,
};
pub use crate::batch::{
    process_input, process_records, run_batch, BatchError, BatchOptions, BatchReport,
    ConvertedRecord, RecordError, RecordOutcome, RunSummary,
};
pub use crate::config::{BatchConfig, ConfigLoadError, LogFormat};
pub use crate::converter::{ConvertError, DocumentConverter, ProcessConverter};
pub use crate::transform::{transform, PreparedRecord, TransformOptions, TransformedRecord};
