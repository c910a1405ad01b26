//! Calendar of dated, optionally recurring to-do notes
//!
//! Each `.md` file in the calendar directory is one task with a header
//! (see [`metadata`]). Listing sorts the tasks by date; completing a
//! recurring task moves its `date` forward by its `period` in place.

pub mod complete;
pub mod metadata;
pub mod period;
pub mod registry;
pub mod view;

pub use complete::{complete, run, Outcome, PickerState};
pub use metadata::{format_date, parse_date, parse_entry};
pub use period::{Recurrence, Unit};
pub use registry::scan;
pub use view::{due_count, render, sort_by_date};

use chrono::NaiveDate;
use std::path::PathBuf;

/// A parsed calendar note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEntry {
    pub title: String,
    pub date: NaiveDate,
    pub recurrence: Option<Recurrence>,
    /// `date` advanced by `recurrence`, present iff `recurrence` is
    pub next_date: Option<NaiveDate>,
    /// File name inside the calendar directory
    pub source_id: String,
}

/// Why a single note could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    MalformedDocument(String),
    MissingDate,
    MissingTitle,
    InvalidDate(String),
    InvalidPeriod(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::MalformedDocument(msg) => write!(f, "malformed document: {}", msg),
            ParseError::MissingDate => write!(f, "date is missing"),
            ParseError::MissingTitle => write!(f, "title is missing"),
            ParseError::InvalidDate(raw) => {
                write!(f, "invalid date {:?}, expected DD.MM.YYYY", raw)
            }
            ParseError::InvalidPeriod(raw) => {
                write!(f, "invalid period {:?}, expected <count><y|m|w|d>", raw)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Error type for calendar operations
#[derive(Debug)]
pub enum CalendarError {
    Parse { file: String, source: ParseError },
    DirectoryUnavailable { path: PathBuf, source: std::io::Error },
    ReadFailed { path: PathBuf, source: std::io::Error },
    PersistFailed { path: PathBuf, source: std::io::Error },
    /// The picker reported a selection without a token
    NoSelection,
    /// The selected token does not name a note in the calendar directory
    UnknownEntry(String),
    Emit(std::io::Error),
}

impl std::fmt::Display for CalendarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalendarError::Parse { file, source } => write!(f, "failed parsing {}: {}", file, source),
            CalendarError::DirectoryUnavailable { path, source } => {
                write!(f, "read dir {} failed: {}", path.display(), source)
            }
            CalendarError::ReadFailed { path, source } => {
                write!(f, "failed reading {}: {}", path.display(), source)
            }
            CalendarError::PersistFailed { path, source } => {
                write!(f, "failed writing {}: {}", path.display(), source)
            }
            CalendarError::NoSelection => write!(f, "no calendar entry was selected"),
            CalendarError::UnknownEntry(token) => write!(f, "unknown calendar entry {:?}", token),
            CalendarError::Emit(e) => write!(f, "failed writing picker output: {}", e),
        }
    }
}

impl std::error::Error for CalendarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CalendarError::Parse { source, .. } => Some(source),
            CalendarError::DirectoryUnavailable { source, .. }
            | CalendarError::ReadFailed { source, .. }
            | CalendarError::PersistFailed { source, .. }
            | CalendarError::Emit(source) => Some(source),
            CalendarError::NoSelection | CalendarError::UnknownEntry(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CalendarError>;
