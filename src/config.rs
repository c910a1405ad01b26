//! Configuration file support for gtd
//!
//! Reads from `$GTD_CONFIG` or `<config dir>/gtd/config.toml`

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the notes root
pub const ROOT_ENV: &str = "GTD_ROOT";
/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "GTD_CONFIG";

/// Contents of the config file; every key is optional
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct ConfigFile {
    /// Notes root. Default: `~/GTD`
    #[serde(default)]
    pub root: Option<String>,

    /// Directories and files below, relative to `root` unless absolute
    #[serde(default)]
    pub inbox: Option<String>,
    #[serde(default)]
    pub next_actions: Option<String>,
    #[serde(default)]
    pub calendar: Option<String>,
    #[serde(default)]
    pub bookmarks: Option<String>,

    /// Program that opens files and URLs
    #[serde(default)]
    pub opener: Option<String>,

    /// Line-oriented search tool used by `find`. Default: `rg`
    #[serde(default)]
    pub search_tool: Option<String>,
}

/// Resolved paths and programs every command works with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub notes_root: PathBuf,
    pub inbox_dir: PathBuf,
    pub next_actions_dir: PathBuf,
    pub calendar_dir: PathBuf,
    pub bookmarks_file: PathBuf,
    pub opener: String,
    pub search_tool: String,
}

fn default_opener() -> String {
    if cfg!(target_os = "macos") {
        "open".to_string()
    } else {
        "xdg-open".to_string()
    }
}

/// Expand a leading `~/`
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

fn below(root: &Path, value: Option<&str>, default: &str) -> PathBuf {
    let path = expand_home(value.unwrap_or(default));
    if path.is_absolute() {
        path
    } else {
        root.join(path)
    }
}

impl Config {
    /// Layout under `root` with every other setting at its default
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self::resolve(&ConfigFile::default(), root.into())
    }

    /// Resolve a config file against a notes root
    pub fn resolve(file: &ConfigFile, root: PathBuf) -> Self {
        Self {
            inbox_dir: below(&root, file.inbox.as_deref(), "in"),
            next_actions_dir: below(&root, file.next_actions.as_deref(), "next_actions"),
            calendar_dir: below(&root, file.calendar.as_deref(), "calendar"),
            bookmarks_file: below(
                &root,
                file.bookmarks.as_deref(),
                "reference/browser_bookmarks.toml",
            ),
            opener: file.opener.clone().unwrap_or_else(default_opener),
            search_tool: file.search_tool.clone().unwrap_or_else(|| "rg".to_string()),
            notes_root: root,
        }
    }

    /// Load the config file and pick the notes root.
    ///
    /// The root comes from `root_override`, then `$GTD_ROOT`, then the
    /// file's `root`, then `~/GTD`. A missing file means defaults; an
    /// unreadable one is reported and ignored.
    pub fn load(root_override: Option<PathBuf>) -> Self {
        let file = Self::find_config_path()
            .map(|path| Self::read_file(&path))
            .unwrap_or_default();

        let root = root_override
            .or_else(|| std::env::var_os(ROOT_ENV).map(PathBuf::from))
            .or_else(|| file.root.as_deref().map(expand_home))
            .unwrap_or_else(|| expand_home("~/GTD"));

        log::debug!("Using notes root {}", root.display());
        Self::resolve(&file, root)
    }

    fn find_config_path() -> Option<PathBuf> {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => dirs::config_dir()?.join("gtd").join("config.toml"),
        };
        path.exists().then_some(path)
    }

    fn read_file(path: &Path) -> ConfigFile {
        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|contents| toml::from_str::<ConfigFile>(&contents).map_err(|e| e.to_string()));

        match parsed {
            Ok(file) => file,
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path.display(), e);
                ConfigFile::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = Config::with_root("/notes");
        assert_eq!(config.notes_root, PathBuf::from("/notes"));
        assert_eq!(config.inbox_dir, PathBuf::from("/notes/in"));
        assert_eq!(config.next_actions_dir, PathBuf::from("/notes/next_actions"));
        assert_eq!(config.calendar_dir, PathBuf::from("/notes/calendar"));
        assert_eq!(
            config.bookmarks_file,
            PathBuf::from("/notes/reference/browser_bookmarks.toml")
        );
        assert_eq!(config.search_tool, "rg");
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
root = "/srv/gtd"
calendar = "dates"
next_actions = "/elsewhere/next"
opener = "firefox"
"#;
        let file: ConfigFile = toml::from_str(toml).unwrap();
        let config = Config::resolve(&file, PathBuf::from("/srv/gtd"));

        assert_eq!(config.calendar_dir, PathBuf::from("/srv/gtd/dates"));
        assert_eq!(config.next_actions_dir, PathBuf::from("/elsewhere/next"));
        assert_eq!(config.inbox_dir, PathBuf::from("/srv/gtd/in"));
        assert_eq!(config.opener, "firefox");
    }

    #[test]
    fn test_empty_config_file() {
        let file: ConfigFile = toml::from_str("").unwrap();
        assert!(file.root.is_none());
        assert!(file.search_tool.is_none());
    }

    #[test]
    fn test_expand_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/GTD"), home.join("GTD"));
        }
        assert_eq!(expand_home("/abs/path"), PathBuf::from("/abs/path"));
        assert_eq!(expand_home("rel"), PathBuf::from("rel"));
    }

    #[test]
    fn test_read_file_ignores_garbage() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "root = [not toml").unwrap();
        assert!(Config::read_file(&path).root.is_none());
    }
}
