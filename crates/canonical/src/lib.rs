//! Canonical text layer for article records.
//!
//! This crate owns the two things every other stage relies on:
//!
//! - **Text sanitization**: [`normalize_text`] strips C0 control characters
//!   (keeping `\n`, `\r`, `\t`), trims, and maps "nothing left" to `None`.
//!   [`collapse_whitespace`] folds whitespace runs into single spaces.
//! - **Canonical output**: [`CanonicalDocument`] and the [`Envelope`] shape
//!   the downstream HWPX converter reads.
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no global state. The same input always produces the
//! same output.

mod document;
mod error;
mod text;
mod whitespace;

pub use crate::document::{
    CanonicalDocument, Envelope, EnvelopeData, EnvelopeOptions, TextSegment, RESPONSE_CODE_OK,
    RESPONSE_TEXT_OK,
};
pub use crate::error::CanonicalError;
pub use crate::text::{normalize_text, strip_control_chars};
pub use crate::whitespace::collapse_whitespace;
