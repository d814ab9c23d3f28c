//! Batch-scoped allocation of unique identifiers and output filenames.
//!
//! An [`AllocationContext`] is created for one input file, threaded through
//! every record of that file, and dropped when the file is done. It is the
//! only mutable state in the pipeline. Allocation takes `&mut self`, so the
//! check-then-register step can never interleave between records.
//!
//! Collisions are resolved the same way for both namespaces: the first free
//! suffix from `_2` upwards is appended to the base name.
//!
//! ```rust
//! use hwpx_batch::AllocationContext;
//!
//! let mut ctx = AllocationContext::new();
//! assert_eq!(ctx.allocate_identifier([Some("A-1")]), "A-1");
//! assert_eq!(ctx.allocate_identifier([Some(" A-1 ")]), "A-1_2");
//! assert_eq!(ctx.allocate_identifier([None, Some("")]), "ARTICLE_00003");
//!
//! assert_eq!(ctx.allocate_filename("Report: Q1/Q2?", "A-1"), "Report_ Q1_Q2_");
//! assert_eq!(ctx.allocate_filename("Report: Q1/Q2?", "A-1"), "Report_ Q1_Q2__2");
//! ```
use std::collections::HashSet;

use canonical::{collapse_whitespace, normalize_text};

/// Prefix of identifiers synthesized for records without a usable id.
pub const SYNTHETIC_ID_PREFIX: &str = "ARTICLE";
/// Basename used when neither the preferred nor the fallback name survives
/// sanitization.
pub const FALLBACK_BASENAME: &str = "document";

/// Characters that are invalid in file names on common filesystems.
const RESERVED_FILENAME_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Uniqueness state for one input batch.
#[derive(Debug, Default)]
pub struct AllocationContext {
    used_ids: HashSet<String>,
    used_filenames: HashSet<String>,
}

impl AllocationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of identifiers handed out so far.
    pub fn allocated_ids(&self) -> usize {
        self.used_ids.len()
    }

    /// Number of filenames handed out so far.
    pub fn allocated_filenames(&self) -> usize {
        self.used_filenames.len()
    }

    pub fn is_id_taken(&self, id: &str) -> bool {
        self.used_ids.contains(id)
    }

    pub fn is_filename_taken(&self, basename: &str) -> bool {
        self.used_filenames.contains(basename)
    }

    /// Allocates a batch-unique identifier.
    ///
    /// The first candidate that survives [`normalize_text`] is the base; when
    /// none does, `ARTICLE_{n:05}` is synthesized with `n` one more than the
    /// number of identifiers already allocated. The result is registered
    /// before it is returned.
    pub fn allocate_identifier<'a, I>(&mut self, candidates: I) -> String
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let base = candidates
            .into_iter()
            .find_map(normalize_text)
            .unwrap_or_else(|| format!("{SYNTHETIC_ID_PREFIX}_{:05}", self.used_ids.len() + 1));
        claim_unique(&mut self.used_ids, base)
    }

    /// Allocates a batch-unique, filesystem-safe basename (no extension).
    ///
    /// `preferred` is sanitized first; if nothing is left, `fallback` is
    /// sanitized instead; if that is empty too, [`FALLBACK_BASENAME`] is used.
    pub fn allocate_filename(&mut self, preferred: &str, fallback: &str) -> String {
        let mut base = sanitize_filename_component(preferred);
        if base.is_empty() {
            base = sanitize_filename_component(fallback);
        }
        if base.is_empty() {
            base = FALLBACK_BASENAME.to_string();
        }
        claim_unique(&mut self.used_filenames, base)
    }
}

/// Registers `base`, or the first free `{base}_{n}` for `n >= 2`.
fn claim_unique(used: &mut HashSet<String>, base: String) -> String {
    if !used.contains(&base) {
        used.insert(base.clone());
        return base;
    }

    let mut counter: u64 = 2;
    loop {
        let candidate = format!("{base}_{counter}");
        if !used.contains(&candidate) {
            used.insert(candidate.clone());
            return candidate;
        }
        counter += 1;
    }
}

/// Makes a string usable as a file basename.
///
/// Whitespace runs collapse to one space, each run of reserved characters
/// (`\ / : * ? " < > |`) becomes a single `_`, then surrounding whitespace
/// and dots are stripped.
pub fn sanitize_filename_component(value: &str) -> String {
    let collapsed = collapse_whitespace(value);
    let mut cleaned = String::with_capacity(collapsed.len());
    let mut in_reserved_run = false;

    for ch in collapsed.chars() {
        if RESERVED_FILENAME_CHARS.contains(&ch) {
            if !in_reserved_run {
                cleaned.push('_');
                in_reserved_run = true;
            }
        } else {
            cleaned.push(ch);
            in_reserved_run = false;
        }
    }

    cleaned.trim().trim_matches('.').to_string()
}

/// Joins a normalized title and a parsed date with `_`, using whichever is
/// present. `None` when both are missing.
pub fn compose_title_date(title: Option<&str>, date: Option<&str>) -> Option<String> {
    match (title, date) {
        (Some(title), Some(date)) => Some(format!("{title}_{date}")),
        (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_normalizable_candidate_wins() {
        let mut ctx = AllocationContext::new();
        let id = ctx.allocate_identifier([Some(" \u{0003} "), Some("  legacy-7 ")]);
        assert_eq!(id, "legacy-7");
        assert!(ctx.is_id_taken("legacy-7"));
    }

    #[test]
    fn duplicate_candidates_get_numbered_suffixes() {
        let mut ctx = AllocationContext::new();
        let ids: Vec<String> = (0..4).map(|_| ctx.allocate_identifier([Some("dup")])).collect();
        assert_eq!(ids, ["dup", "dup_2", "dup_3", "dup_4"]);
        assert_eq!(ctx.allocated_ids(), 4);
    }

    #[test]
    fn suffix_skips_values_already_in_use() {
        let mut ctx = AllocationContext::new();
        assert_eq!(ctx.allocate_identifier([Some("x_2")]), "x_2");
        assert_eq!(ctx.allocate_identifier([Some("x")]), "x");
        assert_eq!(ctx.allocate_identifier([Some("x")]), "x_3");
    }

    #[test]
    fn synthetic_ids_count_all_allocations() {
        let mut ctx = AllocationContext::new();
        assert_eq!(ctx.allocate_identifier([None, None]), "ARTICLE_00001");
        assert_eq!(ctx.allocate_identifier([Some("real")]), "real");
        assert_eq!(ctx.allocate_identifier([None, Some("   ")]), "ARTICLE_00003");
    }

    #[test]
    fn synthetic_id_collision_is_resolved() {
        let mut ctx = AllocationContext::new();
        assert_eq!(ctx.allocate_identifier([Some("ARTICLE_00002")]), "ARTICLE_00002");
        assert_eq!(ctx.allocate_identifier([None]), "ARTICLE_00002_2");
    }

    #[test]
    fn many_duplicates_stay_pairwise_distinct() {
        let mut ctx = AllocationContext::new();
        let ids: HashSet<String> = (0..250)
            .map(|i| match i % 3 {
                0 => ctx.allocate_identifier([Some("same")]),
                1 => ctx.allocate_identifier([None, Some("same")]),
                _ => ctx.allocate_identifier([None, None]),
            })
            .collect();
        assert_eq!(ids.len(), 250);
    }

    #[test]
    fn sanitize_replaces_reserved_runs() {
        let out = sanitize_filename_component("Report: Q1/Q2?");
        assert_eq!(out, "Report_ Q1_Q2_");
        assert!(!out.contains([':', '/', '?']));

        assert_eq!(sanitize_filename_component(r#"a\/:*?"<>|b"#), "a_b");
        assert_eq!(sanitize_filename_component("a  \t\n b"), "a b");
    }

    #[test]
    fn sanitize_strips_edge_dots() {
        assert_eq!(sanitize_filename_component("...hidden name..."), "hidden name");
        assert_eq!(sanitize_filename_component("  v1.2. "), "v1.2");
        assert_eq!(sanitize_filename_component(" . "), "");
    }

    #[test]
    fn filename_falls_back_in_order() {
        let mut ctx = AllocationContext::new();
        assert_eq!(ctx.allocate_filename("", "A-1"), "A-1");
        assert_eq!(ctx.allocate_filename("...", "B:2"), "B_2");
        assert_eq!(ctx.allocate_filename(" ", "."), "document");
        assert_eq!(ctx.allocate_filename("", ""), "document_2");
        assert_eq!(ctx.allocated_filenames(), 4);
    }

    #[test]
    fn same_base_twice_is_suffixed() {
        let mut ctx = AllocationContext::new();
        let first = ctx.allocate_filename("Report: Q1/Q2?", "id");
        let second = ctx.allocate_filename("Report: Q1/Q2?", "id");
        assert_eq!(second, format!("{first}_2"));
        assert!(ctx.is_filename_taken(&first) && ctx.is_filename_taken(&second));
    }

    #[test]
    fn ids_and_filenames_are_independent_namespaces() {
        let mut ctx = AllocationContext::new();
        assert_eq!(ctx.allocate_identifier([Some("shared")]), "shared");
        assert_eq!(ctx.allocate_filename("shared", "x"), "shared");
    }

    #[test]
    fn title_date_composition() {
        assert_eq!(
            compose_title_date(Some("Report"), Some("2024-01-02")).as_deref(),
            Some("Report_2024-01-02")
        );
        assert_eq!(compose_title_date(Some("Report"), None).as_deref(), Some("Report"));
        assert_eq!(compose_title_date(None, Some("2024-01-02")).as_deref(), Some("2024-01-02"));
        assert_eq!(compose_title_date(None, None), None);
    }
}
