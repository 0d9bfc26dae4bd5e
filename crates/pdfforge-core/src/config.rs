//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from TOML by the binary and
//! carries the Ghostscript location, default conversion options, and batch
//! settings. Every section defaults sensibly so an empty file is valid.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::options::{ConversionOptions, KNOWN_PDF_SETTINGS};

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ghostscript: GhostscriptConfig,
    /// Options applied underneath every conversion request.
    pub defaults: ConversionOptions,
    pub batch: BatchConfig,
}

impl Config {
    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(ref root) = self.ghostscript.install_root {
            if !root.exists() {
                warnings.push(format!(
                    "ghostscript.install_root {} does not exist",
                    root.display()
                ));
            }
        }

        if let Some(ref dir) = self.ghostscript.bin_dir {
            if !dir.exists() {
                warnings.push(format!(
                    "ghostscript.bin_dir {} does not exist",
                    dir.display()
                ));
            }
        }

        if self.ghostscript.timeout_secs == Some(0) {
            warnings.push("ghostscript.timeout_secs is 0; every conversion will time out".into());
        }

        if let Some(ref preset) = self.defaults.pdf_settings {
            if !KNOWN_PDF_SETTINGS.contains(&preset.as_str()) {
                warnings.push(format!(
                    "defaults.pdf_settings '{}' is not a recognized preset (valid: {})",
                    preset,
                    KNOWN_PDF_SETTINGS.join(", ")
                ));
            }
        }

        if self.batch.max_concurrent == 0 {
            warnings.push("batch.max_concurrent is 0; no conversion could ever run".into());
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Where the bundled Ghostscript lives and how it is run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GhostscriptConfig {
    /// Application install root; `binaries/gs9540w64/bin` is resolved under it.
    /// Defaults to the directory containing the running executable.
    pub install_root: Option<PathBuf>,
    /// Full override of the Ghostscript `bin` directory.
    pub bin_dir: Option<PathBuf>,
    /// Kill conversions that run longer than this. Unset means no limit.
    pub timeout_secs: Option<u64>,
}

impl GhostscriptConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Settings for converting many files at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Maximum number of Ghostscript processes running at the same time.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
        }
    }
}

fn default_max_concurrent() -> usize {
    num_cpus::get().max(1)
}
