//! Record transformation: one raw record in, one canonical document plus its
//! output basename out.
//!
//! The work is split in two phases:
//!
//! - [`PreparedRecord::prepare`] does everything that needs no shared state:
//!   content resolution, title normalization, date parsing and metadata
//!   extraction. It can run on any thread, in any order.
//! - [`PreparedRecord::allocate`] takes the batch [`AllocationContext`]
//!   mutably and assigns the identifier and then the basename.
//!
//! [`transform`] runs both back to back.
use canonical::{normalize_text, CanonicalDocument, TextSegment};
use ingest::{resolve_contents_with_source, ContentSource, DateConfig, RawRecord, RecordMetadata};

use crate::allocate::{compose_title_date, AllocationContext};

/// Per-run switches for record transformation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOptions {
    /// Ask the converter to render the author/department/date header.
    pub include_header: bool,
    /// Name output files `<title>_<YYYY-MM-DD>` instead of by identifier.
    pub title_date_name: bool,
    pub date: DateConfig,
}

/// A record with all stateless work done, waiting for allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRecord {
    id_candidates: [Option<String>; 2],
    subject: String,
    contents: Vec<TextSegment>,
    content_source: ContentSource,
    metadata: RecordMetadata,
    preferred_basename: Option<String>,
    include_header: bool,
}

/// Output of a transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedRecord {
    pub document: CanonicalDocument,
    /// Output file name without extension.
    pub basename: String,
}

impl PreparedRecord {
    pub fn prepare(record: &RawRecord, options: &TransformOptions) -> Self {
        let (contents, content_source) = resolve_contents_with_source(record);

        let preferred_basename = if options.title_date_name {
            let title = normalize_text(record.title.as_deref());
            let created = options
                .date
                .parse_created_date(record.metadata.created_at.as_deref());
            compose_title_date(title.as_deref(), created.as_deref())
        } else {
            None
        };

        Self {
            id_candidates: [record.article_id.clone(), record.id.clone()],
            subject: record.title.clone().unwrap_or_default(),
            contents,
            content_source,
            metadata: record.metadata.clone(),
            preferred_basename,
            include_header: options.include_header,
        }
    }

    pub fn content_source(&self) -> ContentSource {
        self.content_source
    }

    /// Assigns the identifier, then the basename, registering both in `ctx`.
    pub fn allocate(self, ctx: &mut AllocationContext) -> TransformedRecord {
        let [article_id, id] = &self.id_candidates;
        let id = ctx.allocate_identifier([article_id.as_deref(), id.as_deref()]);
        let basename = ctx.allocate_filename(self.preferred_basename.as_deref().unwrap_or(""), &id);

        let RecordMetadata {
            created_at,
            author,
            department,
        } = self.metadata;

        TransformedRecord {
            document: CanonicalDocument {
                id,
                subject: self.subject,
                contents: self.contents,
                reg_dt: created_at,
                reg_emp_name: author,
                reg_dept_name: department,
                include_header: self.include_header,
            },
            basename,
        }
    }
}

/// Transforms one record against the batch allocation context.
pub fn transform(
    record: &RawRecord,
    options: &TransformOptions,
    ctx: &mut AllocationContext,
) -> TransformedRecord {
    PreparedRecord::prepare(record, options).allocate(ctx)
}
