//! Note header parsing
//!
//! A calendar note opens with a dash rule followed by a block of
//! `key: value` lines:
//!
//! ```text
//! ---
//! title: Pay rent
//! date: 01.03.2024
//! period: 1m
//! ---
//!
//! Free-form notes.
//! ```
//!
//! The block ends at the next dash rule, a `...` line, a blank line or the
//! end of the document, and is decoded as YAML.

use super::period::Recurrence;
use super::{CalendarEntry, ParseError};
use chrono::NaiveDate;
use regex::Regex;
use serde::Deserialize;
use std::ops::Range;

/// `DD.MM.YYYY`, as stored in the `date` field
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Location of the header block inside a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Zero-based line indices of the block, delimiters excluded
    pub lines: Range<usize>,
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawMetadata {
    #[serde(default)]
    title: Option<serde_yaml::Value>,
    #[serde(default)]
    date: Option<serde_yaml::Value>,
    #[serde(default)]
    period: Option<serde_yaml::Value>,
}

fn is_rule(line: &str) -> bool {
    let line = line.trim();
    line.len() >= 3 && line.chars().all(|c| c == '-')
}

fn ends_block(line: &str) -> bool {
    line.trim().is_empty() || is_rule(line) || line.trim() == "..."
}

/// Find the header block, if the document has one
pub fn locate_header(content: &str) -> Option<Header> {
    let lines: Vec<&str> = content.lines().collect();

    let opening = lines.iter().position(|line| !line.trim().is_empty())?;
    if !is_rule(lines[opening]) {
        return None;
    }

    let start = opening + 1;
    let end = lines[start..]
        .iter()
        .position(|line| ends_block(line))
        .map(|offset| start + offset)
        .unwrap_or(lines.len());

    if start == end {
        return None;
    }

    Some(Header {
        lines: start..end,
        text: lines[start..end].join("\n"),
    })
}

/// Text of a YAML scalar; `None` for null and for non-scalar values
fn scalar_text(value: Option<serde_yaml::Value>) -> Option<String> {
    use serde_yaml::Value;

    match value? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(Some(tagged.value)),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Parse a `DD.MM.YYYY` date, strictly two/two/four digits
pub fn parse_date(raw: &str) -> Result<NaiveDate, ParseError> {
    let invalid = || ParseError::InvalidDate(raw.to_string());

    let re = Regex::new(r"^\d{2}\.\d{2}\.\d{4}$").map_err(|_| invalid())?;
    let trimmed = raw.trim();
    if !re.is_match(trimmed) {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| invalid())
}

/// Format a date the way the `date` field stores it
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a note document into a calendar entry
pub fn parse_entry(source_id: &str, content: &str) -> Result<CalendarEntry, ParseError> {
    let header = locate_header(content).ok_or_else(|| {
        ParseError::MalformedDocument("no metadata block after the opening rule".to_string())
    })?;

    let raw: RawMetadata = serde_yaml::from_str(&header.text)
        .map_err(|e| ParseError::MalformedDocument(e.to_string()))?;

    let date = scalar_text(raw.date).ok_or(ParseError::MissingDate)?;
    let title = scalar_text(raw.title).ok_or(ParseError::MissingTitle)?;
    let date = parse_date(&date)?;

    let (recurrence, next_date) = match scalar_text(raw.period) {
        Some(period) => {
            let recurrence: Recurrence = period
                .parse()
                .map_err(|_| ParseError::InvalidPeriod(period.clone()))?;
            let next_date = recurrence
                .apply(date)
                .ok_or_else(|| ParseError::InvalidPeriod(period.clone()))?;
            (Some(recurrence), Some(next_date))
        }
        None => (None, None),
    };

    Ok(CalendarEntry {
        title,
        date,
        recurrence,
        next_date,
        source_id: source_id.to_string(),
    })
}
