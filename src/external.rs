//! External programs: the system opener and the note search tool

use std::path::Path;
use std::process::{Command, Stdio};

/// Error type for running external programs
#[derive(Debug)]
pub enum ExternalError {
    NotFound { program: String },
    CommandFailed { command: String, stderr: String },
    IoError(std::io::Error),
}

impl std::fmt::Display for ExternalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExternalError::NotFound { program } => {
                write!(f, "'{}' not found. Is it installed and on PATH?", program)
            }
            ExternalError::CommandFailed { command, stderr } => {
                write!(f, "Command '{}' failed: {}", command, stderr)
            }
            ExternalError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ExternalError {}

impl From<std::io::Error> for ExternalError {
    fn from(e: std::io::Error) -> Self {
        ExternalError::IoError(e)
    }
}

pub type Result<T> = std::result::Result<T, ExternalError>;

fn spawn_error(program: &str, e: std::io::Error) -> ExternalError {
    if e.kind() == std::io::ErrorKind::NotFound {
        ExternalError::NotFound {
            program: program.to_string(),
        }
    } else {
        ExternalError::IoError(e)
    }
}

/// Hand `target` (a path or URL) to the opener and return without waiting
pub fn open(opener: &str, target: &str) -> Result<()> {
    log::debug!("Opening {} with {}", target, opener);
    Command::new(opener)
        .arg(target)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| spawn_error(opener, e))?;
    Ok(())
}

/// Case-insensitive search of markdown notes under `root`, returning the
/// tool's raw output
pub fn search(tool: &str, query: &str, root: &Path) -> Result<String> {
    let output = Command::new(tool)
        .args([query, "-i", "--iglob", "*.md"])
        .current_dir(root)
        .output()
        .map_err(|e| spawn_error(tool, e))?;

    // rg exits with 1 when nothing matched
    if output.status.success() || output.status.code() == Some(1) {
        return Ok(String::from_utf8_lossy(&output.stdout).to_string());
    }

    Err(ExternalError::CommandFailed {
        command: format!("{} {}", tool, query),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program() {
        let err = open("gtd-no-such-opener", "x").unwrap_err();
        assert!(matches!(err, ExternalError::NotFound { .. }));
        assert!(err.to_string().contains("gtd-no-such-opener"));
    }

    #[test]
    fn test_search_missing_tool() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = search("gtd-no-such-search-tool", "q", dir.path()).unwrap_err();
        assert!(matches!(err, ExternalError::NotFound { .. }));
    }
}
