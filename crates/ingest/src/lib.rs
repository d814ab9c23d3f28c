//! Article ingest layer.
//!
//! This is where upstream article dumps enter the pipeline. Records are
//! arbitrary JSON written by an extraction process, so nothing is assumed
//! about their shape; every irregularity degrades to a documented default.
//!
//! ## What we do here
//!
//! - **Read records leniently** - [`RawRecord::from_value`] types the handful
//!   of fields we care about and ignores the rest.
//! - **Resolve content** - [`resolve_contents`] picks body text from
//!   `content_text`, then `content` blocks, then the title.
//! - **Parse dates** - [`parse_created_date`] turns locale-flavoured
//!   timestamps into `YYYY-MM-DD` using an ordered substitution table and an
//!   ordered pattern list ([`DateConfig`]).
//!
//! Everything in this crate is stateless. Batch-wide uniqueness of
//! identifiers and filenames is handled by the caller.
//!
//! ## Example
//!
//! ```
//! use ingest::{parse_created_date, resolve_contents, RawRecord};
//! use serde_json::json;
//!
//! let record = RawRecord::from_value(&json!({
//!     "article_id": "N-1",
//!     "title": "Weekly update",
//!     "content_text": "  Shipping on Friday.  ",
//!     "metadata": { "created_at": "2024.03.05 오후 02:15:30" }
//! }))
//! .unwrap();
//!
//! let contents = resolve_contents(&record);
//! assert_eq!(contents[0].value(), "Shipping on Friday.");
//! assert_eq!(
//!     parse_created_date(record.metadata.created_at.as_deref()).as_deref(),
//!     Some("2024-03-05")
//! );
//! ```

mod content;
mod date;
mod error;
mod metadata;
mod types;

pub use crate::content::{resolve_contents, resolve_contents_with_source, ContentSource};
pub use crate::date::{parse_created_date, DateConfig, CANONICAL_DATE_FORMAT};
pub use crate::error::{json_type_name, IngestError};
pub use crate::metadata::RecordMetadata;
pub use crate::types::{ContentBlock, RawRecord};
