//! Locale-aware parsing of loosely formatted source timestamps.
//!
//! Extractors emit creation timestamps in whatever form the source site
//! shows, e.g. `2024.03.05 오후 02:15:30`. Parsing runs in two ordered
//! stages, both driven by [`DateConfig`]:
//!
//! 1. **Substitutions**: each `(from, to)` pair is applied in order with a
//!    plain replace-all. The defaults map the Korean morning and afternoon
//!    markers to `AM`/`PM` and turn `.` date separators into `-`.
//! 2. **Patterns**: chrono format strings tried in order; the first that
//!    consumes the whole input wins.
//!
//! Only the date part is kept, formatted as `YYYY-MM-DD`. Anything that does
//! not match yields `None`; an unparsable date is never an error.
//!
//! ```rust
//! use ingest::parse_created_date;
//!
//! assert_eq!(parse_created_date(Some("2024.03.05 오후 02:15:30")).as_deref(), Some("2024-03-05"));
//! assert_eq!(parse_created_date(Some("2024-01-02 23:59:59")).as_deref(), Some("2024-01-02"));
//! assert_eq!(parse_created_date(Some("not a date")), None);
//! ```
use std::sync::OnceLock;

use chrono::format::{Fixed, Item, Numeric, ParseErrorKind, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::IngestError;

/// Output format of [`DateConfig::parse_created_date`].
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Ordered substitution table and ordered pattern list for date parsing.
///
/// Extend `substitutions` to support another locale's markers; the parsing
/// code does not change.
///
/// ```rust
/// use ingest::DateConfig;
///
/// let mut config = DateConfig::default();
/// config.substitutions.insert(0, ("午後".into(), "PM".into()));
/// config.substitutions.insert(0, ("午前".into(), "AM".into()));
///
/// assert_eq!(
///     config.parse_created_date(Some("2024.03.05 午後 02:15:30")).as_deref(),
///     Some("2024-03-05")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateConfig {
    /// `(from, to)` replacements applied in order before any pattern is tried.
    pub substitutions: Vec<(String, String)>,
    /// chrono format strings, tried in order.
    pub patterns: Vec<String>,
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            substitutions: vec![
                ("오전".into(), "AM".into()),
                ("오후".into(), "PM".into()),
                (".".into(), "-".into()),
            ],
            patterns: vec![
                "%Y-%m-%d %p %I:%M:%S".into(),
                "%Y-%m-%d %H:%M:%S".into(),
                "%Y-%m-%d".into(),
            ],
        }
    }
}

impl DateConfig {
    /// Rejects empty pattern lists, empty substitution sources and patterns
    /// chrono cannot interpret.
    pub fn validate(&self) -> Result<(), IngestError> {
        if self.patterns.is_empty() {
            return Err(IngestError::InvalidDateConfig(
                "at least one date pattern is required".into(),
            ));
        }
        if let Some(index) = self.substitutions.iter().position(|(from, _)| from.is_empty()) {
            return Err(IngestError::InvalidDateConfig(format!(
                "substitution #{} has an empty source",
                index + 1
            )));
        }
        for pattern in &self.patterns {
            if StrftimeItems::new(pattern).any(|item| item == Item::Error) {
                return Err(IngestError::InvalidDateConfig(format!(
                    "unsupported format specifier in pattern {pattern:?}"
                )));
            }
        }
        Ok(())
    }

    /// Parses a raw timestamp into its calendar date.
    pub fn parse(&self, raw: Option<&str>) -> Option<NaiveDate> {
        let trimmed = raw?.trim();
        if trimmed.is_empty() {
            return None;
        }

        let text = self
            .substitutions
            .iter()
            .fold(trimmed.to_string(), |text, (from, to)| text.replace(from, to));

        let parsed = self
            .patterns
            .iter()
            .find_map(|pattern| parse_with_pattern(&text, pattern));
        if parsed.is_none() {
            debug!(raw = trimmed, substituted = %text, "created_date_unparsed");
        }
        parsed
    }

    /// Parses a raw timestamp and renders it as `YYYY-MM-DD`.
    pub fn parse_created_date(&self, raw: Option<&str>) -> Option<String> {
        self.parse(raw)
            .map(|date| date.format(CANONICAL_DATE_FORMAT).to_string())
    }
}

/// Parses with the default Korean-aware [`DateConfig`].
pub fn parse_created_date(raw: Option<&str>) -> Option<String> {
    default_config().parse_created_date(raw)
}

fn default_config() -> &'static DateConfig {
    static DEFAULT: OnceLock<DateConfig> = OnceLock::new();
    DEFAULT.get_or_init(DateConfig::default)
}

/// Date-only patterns fail datetime parsing with `NotEnough`; retry those as
/// plain dates.
fn parse_with_pattern(text: &str, pattern: &str) -> Option<NaiveDate> {
    if !matches_field_widths(text, pattern) {
        return None;
    }
    match NaiveDateTime::parse_from_str(text, pattern) {
        Ok(datetime) => Some(datetime.date()),
        Err(err) if err.kind() == ParseErrorKind::NotEnough => {
            NaiveDate::parse_from_str(text, pattern).ok()
        }
        Err(_) => None,
    }
}

/// Enforces the field widths chrono relaxes: `%Y` is exactly four unsigned
/// digits, `%y` exactly two, `%j` one to three, other numeric fields one or
/// two, and whitespace in the pattern needs at least one whitespace
/// character in the text. Values are left to chrono.
fn matches_field_widths(text: &str, pattern: &str) -> bool {
    let mut rest = text;
    for item in StrftimeItems::new(pattern) {
        rest = match item {
            Item::Literal(literal) => match rest.strip_prefix(literal) {
                Some(tail) => tail,
                None => return false,
            },
            Item::Space(_) => {
                let tail = rest.trim_start();
                if tail.len() == rest.len() {
                    return false;
                }
                tail
            }
            Item::Numeric(numeric, _) => {
                let (min, max) = match numeric {
                    Numeric::Year => (4, 4),
                    Numeric::YearMod100 => (2, 2),
                    Numeric::Ordinal => (1, 3),
                    Numeric::Timestamp | Numeric::Nanosecond => return true,
                    _ => (1, 2),
                };
                let digits = rest
                    .bytes()
                    .take(max)
                    .take_while(u8::is_ascii_digit)
                    .count();
                if digits < min {
                    return false;
                }
                &rest[digits..]
            }
            Item::Fixed(Fixed::UpperAmPm | Fixed::LowerAmPm) => match rest.get(..2) {
                Some(marker)
                    if marker.eq_ignore_ascii_case("AM") || marker.eq_ignore_ascii_case("PM") =>
                {
                    &rest[2..]
                }
                _ => return false,
            },
            Item::Error => return false,
            // Anything else is checked by chrono alone.
            _ => return true,
        };
    }
    rest.is_empty()
}
