//! Browser bookmarks kept in a TOML file
//!
//! ```toml
//! search = "https://duckduckgo.com"
//!
//! [rust]
//! docs = "https://doc.rust-lang.org/std/"
//! crates = "https://crates.io"
//! ```
//!
//! Listed as `rust/docs: https://doc.rust-lang.org/std/`, in file order; keys
//! outside any table are listed without a section prefix.

use std::path::{Path, PathBuf};

/// Error type for bookmark loading
#[derive(Debug)]
pub enum BookmarksError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
}

impl std::fmt::Display for BookmarksError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookmarksError::Io { path, source } => {
                write!(f, "failed reading {}: {}", path.display(), source)
            }
            BookmarksError::Parse { path, source } => {
                write!(f, "failed parsing {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for BookmarksError {}

/// A single bookmark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub section: Option<String>,
    pub name: String,
    pub url: String,
}

impl std::fmt::Display for Bookmark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.section {
            Some(section) => write!(f, "{}/{}: {}", section, self.name, self.url),
            None => write!(f, "{}: {}", self.name, self.url),
        }
    }
}

/// Parse bookmarks from TOML text. Non-string values are skipped.
pub fn parse(content: &str) -> Result<Vec<Bookmark>, toml::de::Error> {
    let table: toml::Table = toml::from_str(content)?;
    let mut bookmarks = Vec::new();

    for (key, value) in table {
        match value {
            toml::Value::String(url) => bookmarks.push(Bookmark {
                section: None,
                name: key,
                url,
            }),
            toml::Value::Table(section) => {
                for (name, value) in section {
                    match value {
                        toml::Value::String(url) => bookmarks.push(Bookmark {
                            section: Some(key.clone()),
                            name,
                            url,
                        }),
                        other => log::warn!("Skipping bookmark {}/{}: {}", key, name, other),
                    }
                }
            }
            other => log::warn!("Skipping bookmark {}: {}", key, other),
        }
    }
    Ok(bookmarks)
}

/// Load the bookmarks file
pub fn load(path: &Path) -> Result<Vec<Bookmark>, BookmarksError> {
    let content = std::fs::read_to_string(path).map_err(|source| BookmarksError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content).map_err(|source| BookmarksError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// The URL of a listing line, i.e. everything after the first `": "`
pub fn url_of(line: &str) -> &str {
    line.split_once(": ").map(|(_, url)| url).unwrap_or(line)
}
