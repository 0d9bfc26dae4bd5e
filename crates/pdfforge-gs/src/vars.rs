//! Location of the vendored Ghostscript and process-wide defaults.

use std::path::{Path, PathBuf};

use pdfforge_core::config::GhostscriptConfig;
use pdfforge_core::{ConversionOptions, Error, Result};

/// Directory under the install root holding vendored binaries.
const BINARIES_DIR: &str = "binaries";

/// Directory of the vendored Ghostscript distribution.
const GHOSTSCRIPT_DIR: &str = "gs9540w64";

/// Console executable of the 64-bit Windows build.
pub const EXECUTABLE_NAME: &str = "gswin64c";

/// `install_root/binaries/gs9540w64/bin`. No filesystem access.
pub fn ghostscript_bin_dir(install_root: &Path) -> PathBuf {
    install_root
        .join(BINARIES_DIR)
        .join(GHOSTSCRIPT_DIR)
        .join("bin")
}

/// Directory containing the running executable.
pub fn default_install_root() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::Internal(format!("{} has no parent directory", exe.display())))
}

/// Ghostscript location and default options, computed once at startup and
/// shared read-only by every conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GhostscriptVars {
    /// Resolved `bin` directory of the vendored distribution.
    pub path: PathBuf,
    /// Options every request is layered over.
    pub default_options: ConversionOptions,
}

impl GhostscriptVars {
    /// Resolve the bin directory under `install_root`, with empty defaults.
    pub fn resolve(install_root: &Path) -> Self {
        Self::with_bin_dir(ghostscript_bin_dir(install_root))
    }

    /// Use `path` as the bin directory directly.
    pub fn with_bin_dir(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            default_options: ConversionOptions::default(),
        }
    }

    pub fn with_default_options(mut self, options: ConversionOptions) -> Self {
        self.default_options = options;
        self
    }

    /// Build from configuration: an explicit `bin_dir` wins, then
    /// `install_root`, then the running executable's directory.
    pub fn from_config(config: &GhostscriptConfig) -> Result<Self> {
        if let Some(ref bin_dir) = config.bin_dir {
            return Ok(Self::with_bin_dir(bin_dir.clone()));
        }

        let root = match config.install_root {
            Some(ref root) => root.clone(),
            None => default_install_root()?,
        };
        Ok(Self::resolve(&root))
    }

    /// Full path of the Ghostscript executable. Existence is not checked.
    pub fn executable(&self) -> PathBuf {
        self.path.join(EXECUTABLE_NAME)
    }
}
