//! # pdfforge-gs
//!
//! Drives the Ghostscript build bundled with the application to compress PDFs
//! or convert them to PDF/A.
//!
//! This crate provides:
//!
//! - **Platform check** ([`platform`]) -- the bundled binary only runs on
//!   Windows; [`startup`] refuses everything else.
//! - **Path resolution** ([`GhostscriptVars`]) -- where the vendored
//!   `gswin64c` lives, plus the default options every request inherits.
//! - **Argument compilation** ([`compile_arguments`]) -- options to an ordered
//!   Ghostscript argument list.
//! - **Command execution** ([`ToolCommand`]) -- async process runner that
//!   captures stdout and stderr.
//! - **Conversion** ([`Converter`]) -- ties the above together.

pub mod args;
pub mod command;
pub mod converter;
pub mod platform;
pub mod tools;
pub mod vars;

// ---- Re-exports for convenience ----

pub use args::compile_arguments;
pub use command::{ToolCommand, ToolOutput};
pub use converter::Converter;
pub use tools::{check_tool, ToolInfo};
pub use vars::{ghostscript_bin_dir, GhostscriptVars, EXECUTABLE_NAME};

use pdfforge_core::config::GhostscriptConfig;

/// Check the host platform and resolve the Ghostscript location.
///
/// Meant to run once when the application starts; the returned value is
/// handed to [`Converter::new`].
pub fn startup(config: &GhostscriptConfig) -> pdfforge_core::Result<GhostscriptVars> {
    platform::check_current_platform()?;
    let vars = GhostscriptVars::from_config(config)?;
    tracing::debug!("ghostscript bin directory: {}", vars.path.display());
    Ok(vars)
}
