mod cli;

use pdfforge::{batch, config};
use pdfforge_core::ConversionOptions;
use pdfforge_gs::{Converter, GhostscriptVars};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "pdfforge=trace,pdfforge_gs=debug,pdfforge_core=debug".to_string()
        } else {
            "pdfforge=info,pdfforge_gs=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            let code = match e.downcast_ref::<pdfforge_core::Error>() {
                Some(err) => {
                    if let Some(stderr) = err.stderr() {
                        eprintln!("{}", stderr.trim_end());
                    }
                    err.exit_code()
                }
                None => 1,
            };
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert {
            file,
            options,
            dry_run,
        } => convert_file(&file, options.to_options(), cli.config.as_deref(), dry_run),
        Commands::Batch {
            files,
            options,
            jobs,
        } => convert_files(files, options.to_options(), cli.config.as_deref(), jobs),
        Commands::CheckTools { json } => check_tools(cli.config.as_deref(), json),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("pdfforge {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Platform check plus path resolution, as every Ghostscript run needs.
fn start_converter(config: &config::Config) -> Result<Converter> {
    let vars = pdfforge_gs::startup(&config.ghostscript)?
        .with_default_options(config.defaults.clone());
    Ok(Converter::new(vars).with_timeout(config.ghostscript.timeout()))
}

fn convert_file(
    file: &Path,
    options: ConversionOptions,
    config_path: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    if dry_run {
        // Printing the command needs no Ghostscript, so skip the platform check.
        let vars = GhostscriptVars::from_config(&config.ghostscript)?
            .with_default_options(config.defaults.clone());
        let converter = Converter::new(vars);
        println!("{}", converter.command(file, &options));
        return Ok(());
    }

    let converter = start_converter(&config)?;

    if !file.exists() {
        anyhow::bail!("Input file does not exist: {:?}", file);
    }

    let output = options
        .merged_over(&config.defaults)
        .resolve(file)
        .output_path();

    let rt = tokio::runtime::Runtime::new()?;
    let stdout = rt.block_on(converter.convert(file, &options))?;

    print!("{stdout}");
    println!("Output: {}", output.display());
    Ok(())
}

fn convert_files(
    files: Vec<PathBuf>,
    options: ConversionOptions,
    config_path: Option<&Path>,
    jobs: Option<usize>,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let converter = start_converter(&config)?;
    let max_concurrent = jobs.unwrap_or(config.batch.max_concurrent);

    tracing::info!(
        "Converting {} files, at most {} at a time",
        files.len(),
        max_concurrent
    );

    let rt = tokio::runtime::Runtime::new()?;
    let outcomes = rt.block_on(batch::convert_all(
        &converter,
        files,
        &options,
        max_concurrent,
    ));

    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(_) => println!("✓ {}", outcome.file.display()),
            Err(e) => {
                failed += 1;
                println!("✗ {}: {}", outcome.file.display(), e);
            }
        }
    }

    println!();
    println!(
        "{} converted, {} failed",
        outcomes.len() - failed,
        failed
    );

    if failed > 0 {
        anyhow::bail!("{failed} of {} conversions failed", outcomes.len());
    }

    Ok(())
}

fn check_tools(config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let converter = start_converter(&config)?;

    let rt = tokio::runtime::Runtime::new()?;
    let tool = rt.block_on(converter.check_tool());

    if json {
        println!("{}", serde_json::to_string_pretty(&tool)?);
        if !tool.available {
            anyhow::bail!("Ghostscript not found at {}", tool.expected_path.display());
        }
        return Ok(());
    }

    println!("Checking Ghostscript...\n");

    if tool.available {
        print!("✓ {}", tool.name);
        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }
        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }
        println!();
        Ok(())
    } else {
        println!("✗ {} - {}", tool.name, tool.expected_path.display());
        anyhow::bail!(
            "Ghostscript not found at {}",
            tool.expected_path.display()
        )
    }
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            print_config(&config);
            for warning in config.validate() {
                println!("  warning: {warning}");
            }
        }
        None => {
            println!("No config file specified, using defaults");
            print_config(&config::Config::default());
        }
    }

    Ok(())
}

fn print_config(config: &config::Config) {
    match config.ghostscript.bin_dir {
        Some(ref dir) => println!("  Ghostscript bin dir: {}", dir.display()),
        None => match config.ghostscript.install_root {
            Some(ref root) => println!("  Install root: {}", root.display()),
            None => println!("  Install root: <executable directory>"),
        },
    }
    match config.ghostscript.timeout_secs {
        Some(secs) => println!("  Timeout: {secs}s"),
        None => println!("  Timeout: none"),
    }
    println!("  Default mode: {:?}", config.defaults.mode());
    if let Some(ref preset) = config.defaults.pdf_settings {
        println!("  Default preset: {preset}");
    }
    println!("  Batch concurrency: {}", config.batch.max_concurrent);
}
