//! Batch orchestration over input files.
//!
//! Each input file is a JSON array of article records. For every file:
//!
//! 1. Read and parse it. A missing file, unreadable file, invalid JSON, or a
//!    top level that is not an array skips this input only.
//! 2. Create `<output_dir>/<file stem>/`.
//! 3. Create a fresh [`AllocationContext`] and convert the (optionally
//!    capped) records in order. A failing record is reported and the batch
//!    moves on; identifiers and filenames it already claimed stay claimed.
//!
//! Contexts never outlive their input, so names from one file never collide
//! with names from another.
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use canonical::Envelope;
use ingest::{json_type_name, ContentSource, IngestError, RawRecord};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn, Level};

use crate::allocate::AllocationContext;
use crate::converter::{ConvertError, DocumentConverter};
use crate::transform::{PreparedRecord, TransformOptions};

/// Directory name used when an input path has no file stem.
const FALLBACK_INPUT_STEM: &str = "input";

/// Settings shared by every input of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Parent of the per-input output directories.
    pub output_dir: PathBuf,
    /// Extension appended to every basename, without the dot.
    pub extension: String,
    /// Process at most this many records per input; `None` or `Some(0)` means all.
    pub max_per_file: Option<usize>,
    pub transform: TransformOptions,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            extension: "hwpx".into(),
            max_per_file: None,
            transform: TransformOptions::default(),
        }
    }
}

impl BatchOptions {
    /// Records of a `total`-long input that will actually be processed.
    pub fn selected_len(&self, total: usize) -> usize {
        match self.max_per_file {
            Some(limit) if limit > 0 => total.min(limit),
            _ => total,
        }
    }

    /// `<output_dir>/<stem of input>`.
    pub fn target_dir(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .unwrap_or_else(|| OsStr::new(FALLBACK_INPUT_STEM));
        self.output_dir.join(stem)
    }
}

/// Errors that skip a whole input file.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("missing input file: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {} as JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} does not contain a list (found {found})", .path.display())]
    NotAList { path: PathBuf, found: &'static str },

    #[error("failed to create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BatchError {
    pub fn path(&self) -> &Path {
        match self {
            Self::MissingInput(path) => path,
            Self::Read { path, .. }
            | Self::Parse { path, .. }
            | Self::NotAList { path, .. }
            | Self::CreateDir { path, .. } => path,
        }
    }
}

/// Errors confined to a single record.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// A record that made it through the converter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedRecord {
    pub id: String,
    /// `<basename>.<extension>`
    pub file_name: String,
    pub output_path: PathBuf,
    /// Which field the document body came from.
    pub content_source: ContentSource,
}

/// Result for one record, with its 1-based position in the input.
#[derive(Debug)]
pub struct RecordOutcome {
    pub index: usize,
    pub result: Result<ConvertedRecord, RecordError>,
}

/// Everything that happened to one input file.
#[derive(Debug)]
pub struct BatchReport {
    pub input: PathBuf,
    pub target_dir: PathBuf,
    /// Records in the input, before any cap.
    pub total: usize,
    pub outcomes: Vec<RecordOutcome>,
}

impl BatchReport {
    pub fn selected(&self) -> usize {
        self.outcomes.len()
    }

    pub fn converted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.selected() - self.converted()
    }

    pub fn converted_records(&self) -> impl Iterator<Item = &ConvertedRecord> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }
}

/// Reports for every processed input plus the inputs that were skipped.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<BatchReport>,
    pub skipped: Vec<BatchError>,
}

impl RunSummary {
    pub fn converted(&self) -> usize {
        self.reports.iter().map(BatchReport::converted).sum()
    }

    pub fn failed(&self) -> usize {
        self.reports.iter().map(BatchReport::failed).sum()
    }
}

/// Processes every input in order. Skipped inputs do not stop the run.
pub fn run_batch<C>(inputs: &[PathBuf], converter: &C, options: &BatchOptions) -> RunSummary
where
    C: DocumentConverter + ?Sized,
{
    let mut summary = RunSummary::default();
    for input in inputs {
        match process_input(input, converter, options) {
            Ok(report) => summary.reports.push(report),
            Err(err) => {
                warn!(input = %input.display(), error = %err, "input_skipped");
                summary.skipped.push(err);
            }
        }
    }
    info!(
        inputs = inputs.len(),
        skipped = summary.skipped.len(),
        converted = summary.converted(),
        failed = summary.failed(),
        "run_complete"
    );
    summary
}

/// Processes one input file with its own allocation context.
pub fn process_input<C>(
    input: &Path,
    converter: &C,
    options: &BatchOptions,
) -> Result<BatchReport, BatchError>
where
    C: DocumentConverter + ?Sized,
{
    let records = read_records(input)?;
    let target_dir = options.target_dir(input);
    fs::create_dir_all(&target_dir).map_err(|source| BatchError::CreateDir {
        path: target_dir.clone(),
        source,
    })?;

    let span = tracing::span!(Level::INFO, "batch.input", input = %input.display());
    let _guard = span.enter();

    let outcomes = process_records(&records, &target_dir, converter, options);
    Ok(BatchReport {
        input: input.to_path_buf(),
        target_dir,
        total: records.len(),
        outcomes,
    })
}

/// Converts records into `target_dir` using a fresh allocation context.
///
/// Honours `max_per_file`; outcomes cover only the selected records.
pub fn process_records<C>(
    records: &[Value],
    target_dir: &Path,
    converter: &C,
    options: &BatchOptions,
) -> Vec<RecordOutcome>
where
    C: DocumentConverter + ?Sized,
{
    let start = Instant::now();
    let total = records.len();
    let selected = options.selected_len(total);
    info!(
        target_dir = %target_dir.display(),
        selected,
        total,
        "batch_start"
    );

    let mut ctx = AllocationContext::new();
    let mut outcomes = Vec::with_capacity(selected);
    for (offset, value) in records[..selected].iter().enumerate() {
        let index = offset + 1;
        let result = convert_record(value, target_dir, converter, options, &mut ctx);
        match &result {
            Ok(converted) => info!(
                index,
                total,
                id = %converted.id,
                file_name = %converted.file_name,
                content_source = converted.content_source.as_str(),
                "record_converted"
            ),
            Err(err) => warn!(index, total, error = %err, "record_failed"),
        }
        outcomes.push(RecordOutcome { index, result });
    }

    let converted = outcomes.iter().filter(|o| o.result.is_ok()).count();
    info!(
        selected,
        converted,
        failed = selected - converted,
        elapsed_micros = start.elapsed().as_micros(),
        "batch_complete"
    );
    outcomes
}

fn convert_record<C>(
    value: &Value,
    target_dir: &Path,
    converter: &C,
    options: &BatchOptions,
    ctx: &mut AllocationContext,
) -> Result<ConvertedRecord, RecordError>
where
    C: DocumentConverter + ?Sized,
{
    let record = RawRecord::from_value(value)?;
    let prepared = PreparedRecord::prepare(&record, &options.transform);
    let content_source = prepared.content_source();
    let transformed = prepared.allocate(ctx);
    let file_name = format!("{}.{}", transformed.basename, options.extension);
    let output_path = target_dir.join(&file_name);
    let id = transformed.document.id.clone();

    converter.convert(&Envelope::new(transformed.document), &output_path)?;

    Ok(ConvertedRecord {
        id,
        file_name,
        output_path,
        content_source,
    })
}

fn read_records(input: &Path) -> Result<Vec<Value>, BatchError> {
    if !input.exists() {
        return Err(BatchError::MissingInput(input.to_path_buf()));
    }
    let text = fs::read_to_string(input).map_err(|source| BatchError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|source| BatchError::Parse {
        path: input.to_path_buf(),
        source,
    })?;
    match value {
        Value::Array(records) => Ok(records),
        other => Err(BatchError::NotAList {
            path: input.to_path_buf(),
            found: json_type_name(&other),
        }),
    }
}
