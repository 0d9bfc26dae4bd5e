//! pdfforge - PDF compression and PDF/A conversion through Ghostscript
//!
//! This library crate exposes configuration loading and batch conversion for
//! the binary and for integration testing.

pub mod batch;
pub mod config;
