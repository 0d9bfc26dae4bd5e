//! pdfforge-core: shared error type, conversion options, and configuration.
//!
//! This crate is the foundational dependency for the other pdfforge crates,
//! providing a unified error type, the typed [`ConversionOptions`] record
//! with its default-resolution rules, and the application configuration.

pub mod config;
pub mod error;
pub mod options;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use options::{ConversionMode, ConversionOptions, ResolvedOptions};
