//! Inbox and next-action note directories
//!
//! Both are flat directories of `.md` files, listed as
//! `<file>.md: <first line>` so a picker line can be mapped back to its file.

use crate::calendar::registry::is_note;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Separator between file name and first line in listings
pub const LINE_SEPARATOR: &str = ": ";

/// Error type for inbox and next-action operations
#[derive(Debug)]
pub enum NotesError {
    Io { path: PathBuf, source: std::io::Error },
    EmptyNote(PathBuf),
    AlreadyExists(PathBuf),
    InvalidItem(String),
}

impl std::fmt::Display for NotesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotesError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            NotesError::EmptyNote(path) => write!(f, "{}: no lines", path.display()),
            NotesError::AlreadyExists(path) => write!(f, "{} already exists", path.display()),
            NotesError::InvalidItem(item) => write!(f, "cannot make a note from {:?}", item),
        }
    }
}

impl std::error::Error for NotesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NotesError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, NotesError>;

/// One line of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Directory(String),
    Note { file: String, first_line: String },
}

impl std::fmt::Display for Listing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Listing::Directory(name) => f.write_str(name),
            Listing::Note { file, first_line } => {
                write!(f, "{}{}{}", file, LINE_SEPARATOR, first_line)
            }
        }
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> NotesError + '_ {
    move |source| NotesError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// First line of a note
pub fn read_first_line(path: &Path) -> Result<String> {
    let file = fs::File::open(path).map_err(io_error(path))?;
    match BufReader::new(file).lines().next() {
        Some(line) => line.map_err(io_error(path)),
        None => Err(NotesError::EmptyNote(path.to_path_buf())),
    }
}

/// List `dir` in name order; subdirectories are included only when
/// `with_directories` is set
pub fn list(dir: &Path, with_directories: bool) -> Result<Vec<Listing>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error(dir))? {
        paths.push(entry.map_err(io_error(dir))?.path());
    }
    paths.sort();

    let mut listing = Vec::new();
    for path in paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if path.is_dir() {
            if with_directories {
                listing.push(Listing::Directory(name));
            }
        } else if is_note(&path) {
            let first_line = read_first_line(&path)?;
            listing.push(Listing::Note {
                file: name,
                first_line,
            });
        }
    }
    Ok(listing)
}

/// Map a listing line `<file>.md: ...` back to the note's path in `dir`
pub fn resolve_listing(dir: &Path, line: &str) -> Option<PathBuf> {
    let (file, _) = line.split_once(LINE_SEPARATOR)?;
    let is_bare_name = Path::new(file).file_name().and_then(|n| n.to_str()) == Some(file);
    let path = dir.join(file);
    (is_bare_name && is_note(&path)).then_some(path)
}

/// Capture `item` as a new inbox note named after its first word
pub fn capture(dir: &Path, item: &str) -> Result<PathBuf> {
    let first_word = item.split_whitespace().next().unwrap_or_default();
    if first_word.is_empty() || first_word.contains(['/', '\\']) || first_word.starts_with('.') {
        return Err(NotesError::InvalidItem(item.to_string()));
    }

    let path = dir.join(format!("{}.md", first_word));
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|source| {
            if source.kind() == std::io::ErrorKind::AlreadyExists {
                NotesError::AlreadyExists(path.clone())
            } else {
                NotesError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;

    writeln!(file, "{}", item).map_err(io_error(&path))?;
    log::debug!("Captured {}", path.display());
    Ok(path)
}
