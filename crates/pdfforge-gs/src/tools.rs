//! Availability check for the vendored Ghostscript executable.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::command::ToolCommand;

/// Availability information for the Ghostscript executable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name.
    pub name: String,
    /// Whether an executable was found at the resolved location.
    pub available: bool,
    /// Version string (first line of `--version` output), if available.
    pub version: Option<String>,
    /// Location the executable is expected at.
    pub expected_path: PathBuf,
    /// Resolved executable, including any platform extension.
    pub path: Option<PathBuf>,
}

/// Probe `executable` and report whether it can be run.
///
/// [`which::which`] with an absolute path checks that the file exists and is
/// executable, adding `.exe` on Windows.
pub async fn check_tool(executable: &Path) -> ToolInfo {
    let name = executable
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let Ok(path) = which::which(executable) else {
        return ToolInfo {
            name,
            available: false,
            version: None,
            expected_path: executable.to_path_buf(),
            path: None,
        };
    };

    let version = detect_version(&path).await;

    ToolInfo {
        name,
        available: true,
        version,
        expected_path: executable.to_path_buf(),
        path: Some(path),
    }
}

/// Run `<tool> --version` and return the first line of stdout.
async fn detect_version(path: &Path) -> Option<String> {
    let output = ToolCommand::new(path.to_path_buf())
        .arg("--version")
        .execute()
        .await
        .ok()?;

    output.stdout.lines().next().map(|s| s.trim().to_string())
}
