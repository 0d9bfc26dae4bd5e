//! Conversion options and their default-resolution rules.

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// The `format` entry that selects PDF/A conversion.
pub const PDFA_FORMAT: &str = "pdfa";

/// Preset names Ghostscript accepts for `-dPDFSETTINGS`.
pub const KNOWN_PDF_SETTINGS: &[&str] = &["screen", "ebook", "printer", "prepress", "default"];

/// Which Ghostscript code path a conversion takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionMode {
    /// Re-write the document with `pdfwrite` at compatibility level 1.4.
    Compress,
    /// Produce a PDF/A compliant document.
    PdfA,
}

impl ConversionMode {
    /// Suffix appended to the output file stem.
    pub fn output_suffix(&self) -> &'static str {
        match self {
            ConversionMode::Compress => "_min",
            ConversionMode::PdfA => "_pdfa",
        }
    }
}

/// Options for a single conversion.
///
/// Only the four fields below are interpreted. Unset fields are filled in by
/// [`ConversionOptions::resolve`]; the caller's value is never modified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    /// Requested formats. Containing `"pdfa"` selects PDF/A conversion.
    pub format: Vec<String>,
    /// Ghostscript `-dPDFSETTINGS` preset name, without the leading slash.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_settings: Option<String>,
    /// Directory for the output file. Defaults to the input's directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_directory: Option<PathBuf>,
    /// Output file stem. Defaults to the input's file stem.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,
}

impl ConversionOptions {
    /// Options selecting the PDF/A path.
    pub fn pdfa() -> Self {
        Self {
            format: vec![PDFA_FORMAT.to_string()],
            ..Self::default()
        }
    }

    /// Set the `-dPDFSETTINGS` preset.
    pub fn with_pdf_settings(mut self, preset: impl Into<String>) -> Self {
        self.pdf_settings = Some(preset.into());
        self
    }

    /// Set the output directory.
    pub fn with_output_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_directory = Some(dir.into());
        self
    }

    /// Set the output file stem.
    pub fn with_output_file(mut self, name: impl Into<String>) -> Self {
        self.output_file = Some(name.into());
        self
    }

    /// The code path selected by `format`.
    pub fn mode(&self) -> ConversionMode {
        if self.format.iter().any(|f| f == PDFA_FORMAT) {
            ConversionMode::PdfA
        } else {
            ConversionMode::Compress
        }
    }

    /// Layer these options over `defaults`: every field set here wins, an
    /// empty `format` inherits the default's `format`.
    pub fn merged_over(&self, defaults: &ConversionOptions) -> ConversionOptions {
        ConversionOptions {
            format: if self.format.is_empty() {
                defaults.format.clone()
            } else {
                self.format.clone()
            },
            pdf_settings: self
                .pdf_settings
                .clone()
                .or_else(|| defaults.pdf_settings.clone()),
            output_directory: self
                .output_directory
                .clone()
                .or_else(|| defaults.output_directory.clone()),
            output_file: self
                .output_file
                .clone()
                .or_else(|| defaults.output_file.clone()),
        }
    }

    /// Fill in defaults derived from the input file path.
    pub fn resolve(&self, file: &Path) -> ResolvedOptions {
        let output_directory = match non_empty_path(self.output_directory.as_deref()) {
            Some(dir) => dir.to_path_buf(),
            None => file.parent().map(Path::to_path_buf).unwrap_or_default(),
        };

        let output_file = match non_empty(self.output_file.as_deref()) {
            Some(name) => OsString::from(name),
            None => file.file_stem().map(OsString::from).unwrap_or_default(),
        };

        ResolvedOptions {
            mode: self.mode(),
            pdf_settings: non_empty(self.pdf_settings.as_deref()).map(str::to_string),
            output_directory,
            output_file,
        }
    }
}

/// [`ConversionOptions`] with every default filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub mode: ConversionMode,
    pub pdf_settings: Option<String>,
    pub output_directory: PathBuf,
    /// Output file stem, kept as raw OS text when taken from the input name.
    pub output_file: OsString,
}

impl ResolvedOptions {
    /// Full path of the file Ghostscript will write.
    ///
    /// Always lands under `output_directory`: a rooted `output_file` has its
    /// root and drive prefix dropped instead of replacing the directory.
    pub fn output_path(&self) -> PathBuf {
        let mut name = self.output_file.clone();
        name.push(self.mode.output_suffix());
        name.push(".pdf");
        let relative: PathBuf = Path::new(&name)
            .components()
            .filter(|c| !matches!(c, Component::Prefix(_) | Component::RootDir))
            .collect();
        self.output_directory.join(relative)
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

fn non_empty_path(p: Option<&Path>) -> Option<&Path> {
    p.filter(|p| !p.as_os_str().is_empty())
}
