//! Ghostscript argument compilation.
//!
//! Ghostscript reads its switches positionally, so the order of the emitted
//! flags is fixed. The input file always comes last.
//!
//! Paths are carried as [`OsString`] so that names which are not valid
//! UTF-8 reach Ghostscript unchanged.

use std::ffi::OsString;
use std::path::Path;

use pdfforge_core::{ConversionMode, ConversionOptions, ResolvedOptions};

/// Compile the Ghostscript argument list for converting `file`.
///
/// Never fails: bad option values surface when Ghostscript rejects them.
pub fn compile_arguments(file: &Path, options: &ConversionOptions) -> Vec<OsString> {
    let resolved = options.resolve(file);
    let mut args = match resolved.mode {
        ConversionMode::PdfA => pdfa_arguments(&resolved),
        ConversionMode::Compress => compress_arguments(&resolved),
    };
    args.push(file.as_os_str().to_os_string());
    args
}

fn pdfa_arguments(options: &ResolvedOptions) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-dPDFA".into(),
        "-dBATCH".into(),
        "-dNOPAUSE".into(),
        "-dUseCIEColor".into(),
        "-sProcessColorModel=DeviceRGB".into(),
    ];
    args.extend(pdf_settings_flag(options));
    args.push("-sDEVICE=pdfwrite".into());
    args.push("-sPDFACompatibilityPolicy=1".into());
    args.push(output_file_flag(options));
    args
}

fn compress_arguments(options: &ResolvedOptions) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-sDEVICE=pdfwrite".into(),
        "-dCompatibilityLevel=1.4".into(),
    ];
    args.extend(pdf_settings_flag(options));
    args.push("-dNOPAUSE".into());
    args.push("-dBATCH".into());
    args.push(output_file_flag(options));
    args
}

fn pdf_settings_flag(options: &ResolvedOptions) -> Option<OsString> {
    options
        .pdf_settings
        .as_ref()
        .map(|preset| format!("-dPDFSETTINGS=/{preset}").into())
}

fn output_file_flag(options: &ResolvedOptions) -> OsString {
    let mut flag = OsString::from("-sOutputFile=\"");
    flag.push(options.output_path());
    flag.push("\"");
    flag
}
