//! Listing and completing calendar notes through a picker
//!
//! One invocation is one step: either the picker has nothing selected yet
//! and every note is offered, or it reports a token and that single note is
//! completed. Completing a recurring note rewrites its `date` line to the
//! next occurrence; every other byte of the file is left alone.

use super::metadata::{format_date, locate_header, parse_entry, Header};
use super::registry::{is_note, load, scan};
use super::view::{render, sort_by_date};
use super::{CalendarError, ParseError, Result};
use crate::picker::Picker;
use chrono::NaiveDate;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Where the picker currently is in the list/select exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerState {
    Listing,
    Selected(String),
}

impl PickerState {
    pub fn detect<P: Picker + ?Sized>(picker: &P) -> Result<Self> {
        if picker.is_first_open() {
            return Ok(PickerState::Listing);
        }
        picker
            .selected_token()
            .map(PickerState::Selected)
            .ok_or(CalendarError::NoSelection)
    }
}

/// What an invocation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// This many entries were offered to the picker
    Listed(usize),
    /// The selected note has no period; nothing to advance
    Unchanged { token: String },
    /// The selected note's date moved forward
    Advanced {
        token: String,
        from: NaiveDate,
        to: NaiveDate,
    },
}

/// Drive one step of the exchange for the notes in `dir`
pub fn run<P: Picker + ?Sized>(picker: &mut P, dir: &Path) -> Result<Outcome> {
    match PickerState::detect(&*picker)? {
        PickerState::Listing => list(picker, dir),
        PickerState::Selected(token) => complete(dir, &token),
    }
}

fn list<P: Picker + ?Sized>(picker: &mut P, dir: &Path) -> Result<Outcome> {
    let entries = sort_by_date(scan(dir)?);
    for entry in &entries {
        picker
            .emit(&render(entry), &entry.source_id)
            .map_err(CalendarError::Emit)?;
    }
    Ok(Outcome::Listed(entries.len()))
}

/// Complete the note named `token` inside `dir`
pub fn complete(dir: &Path, token: &str) -> Result<Outcome> {
    let is_bare_name = Path::new(token).file_name().and_then(|n| n.to_str()) == Some(token);
    if !is_bare_name || !is_note(&dir.join(token)) {
        return Err(CalendarError::UnknownEntry(token.to_string()));
    }

    let entry = load(dir, token)?;
    let Some(next_date) = entry.next_date else {
        log::debug!("{} has no period, nothing to advance", token);
        return Ok(Outcome::Unchanged {
            token: token.to_string(),
        });
    };

    let path = dir.join(token);
    let content = fs::read_to_string(&path).map_err(|source| CalendarError::ReadFailed {
        path: path.clone(),
        source,
    })?;

    let patched = locate_header(&content)
        .and_then(|header| patch_date_line(&content, &header, next_date))
        .ok_or_else(|| CalendarError::Parse {
            file: token.to_string(),
            source: ParseError::MalformedDocument("date is not on a line of its own".to_string()),
        })?;

    let rewritten = parse_entry(token, &patched).map(|entry| entry.date);
    if rewritten != Ok(next_date) {
        return Err(CalendarError::Parse {
            file: token.to_string(),
            source: ParseError::MalformedDocument(
                "rewriting the date line did not change the date field".to_string(),
            ),
        });
    }

    fs::write(&path, patched).map_err(|source| CalendarError::PersistFailed {
        path: path.clone(),
        source,
    })?;

    log::info!(
        "Moved {} from {} to {}",
        token,
        format_date(entry.date),
        format_date(next_date)
    );
    Ok(Outcome::Advanced {
        token: token.to_string(),
        from: entry.date,
        to: next_date,
    })
}

/// Replace the value of the top-level `date:` line inside `header`.
///
/// Only a key at column zero counts; indented `date:` lines belong to
/// block scalars or nested mappings. The key, its spacing, any quotes around
/// the value, a trailing comment and the line ending are kept. Returns
/// `None` when the header has no such line.
pub fn patch_date_line(content: &str, header: &Header, date: NaiveDate) -> Option<String> {
    let re = Regex::new(r#"^(date[ \t]*:[ \t]*)("[^"]*"|'[^']*'|[^\s#]+)(.*)$"#).ok()?;
    let mut patched = String::with_capacity(content.len());
    let mut replaced = false;

    for (index, line) in content.split_inclusive('\n').enumerate() {
        if replaced || !header.lines.contains(&index) {
            patched.push_str(line);
            continue;
        }

        let (body, eol) = split_line_ending(line);
        match re.captures(body) {
            Some(caps) => {
                let new_value = match caps[2].chars().next() {
                    Some(q @ ('"' | '\'')) => format!("{q}{}{q}", format_date(date)),
                    _ => format_date(date),
                };
                patched.push_str(&caps[1]);
                patched.push_str(&new_value);
                patched.push_str(&caps[3]);
                patched.push_str(eol);
                replaced = true;
            }
            None => patched.push_str(line),
        }
    }

    replaced.then_some(patched)
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}
