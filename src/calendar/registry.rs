//! Directory scan producing one entry per calendar note

use super::metadata::parse_entry;
use super::{CalendarEntry, CalendarError, Result};
use std::fs;
use std::path::Path;

/// Extension of note files; everything else in a note directory is ignored
pub const NOTE_EXTENSION: &str = "md";

/// Whether `path` is a note file worth parsing
pub fn is_note(path: &Path) -> bool {
    !path.is_dir() && path.extension().and_then(|e| e.to_str()) == Some(NOTE_EXTENSION)
}

/// Read and parse a single note of `dir`
pub fn load(dir: &Path, file_name: &str) -> Result<CalendarEntry> {
    let path = dir.join(file_name);
    let content = fs::read_to_string(&path).map_err(|source| CalendarError::ReadFailed {
        path: path.clone(),
        source,
    })?;

    parse_entry(file_name, &content).map_err(|source| CalendarError::Parse {
        file: file_name.to_string(),
        source,
    })
}

/// Parse every note directly inside `dir`.
///
/// Files are visited in name order. The first note that fails to read or
/// parse aborts the scan, naming the file.
pub fn scan(dir: &Path) -> Result<Vec<CalendarEntry>> {
    let unavailable = |source| CalendarError::DirectoryUnavailable {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(unavailable)? {
        let path = entry.map_err(unavailable)?.path();
        if !is_note(&path) {
            log::debug!("Skipping {}", path.display());
            continue;
        }

        match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => names.push(name.to_string()),
            None => log::warn!("Skipping note with non UTF-8 name: {}", path.display()),
        }
    }
    names.sort();

    let entries = names
        .iter()
        .map(|name| load(dir, name))
        .collect::<Result<Vec<_>>>()?;

    log::debug!("Scanned {} calendar notes in {}", entries.len(), dir.display());
    Ok(entries)
}
