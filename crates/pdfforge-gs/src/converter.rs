//! The conversion entry point: options in, Ghostscript run, stdout out.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use pdfforge_core::{ConversionOptions, Result};

use crate::args::compile_arguments;
use crate::command::ToolCommand;
use crate::tools::{check_tool, ToolInfo};
use crate::vars::GhostscriptVars;

/// Runs Ghostscript conversions.
///
/// Cheap to clone; clones share the same [`GhostscriptVars`]. Every call to
/// [`Converter::convert`] spawns its own process, and calls are independent of
/// each other. Nothing here limits how many run at once.
#[derive(Debug, Clone)]
pub struct Converter {
    vars: Arc<GhostscriptVars>,
    timeout: Option<Duration>,
}

impl Converter {
    pub fn new(vars: GhostscriptVars) -> Self {
        Self {
            vars: Arc::new(vars),
            timeout: None,
        }
    }

    /// Kill conversions that take longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The resolved Ghostscript `bin` directory.
    pub fn path(&self) -> &Path {
        &self.vars.path
    }

    pub fn vars(&self) -> &GhostscriptVars {
        &self.vars
    }

    /// Build the full command for converting `file` without running it.
    ///
    /// `options` are layered over the configured default options first.
    pub fn command(&self, file: &Path, options: &ConversionOptions) -> ToolCommand {
        let options = options.merged_over(&self.vars.default_options);
        let mut cmd = ToolCommand::new(self.vars.executable());
        cmd.args(compile_arguments(file, &options));
        if let Some(timeout) = self.timeout {
            cmd.timeout(timeout);
        }
        cmd
    }

    /// Convert `file`, resolving with Ghostscript's standard output.
    ///
    /// The output file is written by Ghostscript itself and is not checked
    /// afterwards. Existing files at the output path are overwritten.
    ///
    /// # Errors
    ///
    /// - [`pdfforge_core::Error::Launch`] if the executable is missing or
    ///   cannot be started.
    /// - [`pdfforge_core::Error::Tool`] if Ghostscript exits unsuccessfully.
    pub async fn convert(
        &self,
        file: impl AsRef<Path>,
        options: &ConversionOptions,
    ) -> Result<String> {
        let file = file.as_ref();
        let cmd = self.command(file, options);

        tracing::info!("convert {:?}: {cmd}", file);

        let output = cmd.execute().await?;
        Ok(output.stdout)
    }

    /// Alias of [`Converter::convert`].
    pub async fn convert_pdf(
        &self,
        file: impl AsRef<Path>,
        options: &ConversionOptions,
    ) -> Result<String> {
        self.convert(file, options).await
    }

    /// Alias of [`Converter::convert`].
    pub async fn convert_pdf_file(
        &self,
        file: impl AsRef<Path>,
        options: &ConversionOptions,
    ) -> Result<String> {
        self.convert(file, options).await
    }

    /// Report whether the Ghostscript executable is present and runnable.
    pub async fn check_tool(&self) -> ToolInfo {
        check_tool(&self.vars.executable()).await
    }
}
