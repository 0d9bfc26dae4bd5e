use clap::{Args, Parser, Subcommand};
use pdfforge_core::options::PDFA_FORMAT;
use pdfforge_core::ConversionOptions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfforge")]
#[command(author, version, about = "Compress PDFs or convert them to PDF/A with Ghostscript")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a single PDF file
    Convert {
        /// PDF file to convert
        #[arg(required = true)]
        file: PathBuf,

        #[command(flatten)]
        options: OptionArgs,

        /// Print the Ghostscript command instead of running it
        #[arg(long)]
        dry_run: bool,
    },

    /// Convert several PDF files concurrently
    Batch {
        /// PDF files to convert
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        options: OptionArgs,

        /// Maximum concurrent Ghostscript processes (overrides config)
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Check that the bundled Ghostscript is available
    CheckTools {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

/// Conversion options shared by `convert` and `batch`.
#[derive(Args, Debug, Clone, Default)]
pub struct OptionArgs {
    /// Convert to PDF/A instead of compressing
    #[arg(long)]
    pub pdfa: bool,

    /// Output format entries; "pdfa" selects PDF/A conversion
    #[arg(long = "format", value_name = "FORMAT")]
    pub format: Vec<String>,

    /// Ghostscript PDFSETTINGS preset (screen, ebook, printer, prepress, default)
    #[arg(long, value_name = "PRESET")]
    pub pdf_settings: Option<String>,

    /// Directory for the output file (defaults to the input's directory)
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output file name without suffix or extension (defaults to the input's name)
    #[arg(long, value_name = "NAME")]
    pub output_file: Option<String>,
}

impl OptionArgs {
    pub fn to_options(&self) -> ConversionOptions {
        let mut format = self.format.clone();
        if self.pdfa && !format.iter().any(|f| f == PDFA_FORMAT) {
            format.push(PDFA_FORMAT.to_string());
        }

        ConversionOptions {
            format,
            pdf_settings: self.pdf_settings.clone(),
            output_directory: self.output_dir.clone(),
            output_file: self.output_file.clone(),
        }
    }
}
