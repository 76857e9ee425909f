use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;

use docxfence::{render_report, Config, Converter, ReportFormat, Strategy};

#[derive(Parser)]
#[command(name = "docxfence")]
#[command(about = "Convert .docx files to Markdown wrapped in a code fence")]
#[command(version)]
struct Cli {
    /// Input .docx files
    inputs: Vec<PathBuf>,

    /// Glob pattern for input files, e.g. '*.docx'
    #[arg(long = "glob", value_name = "PATTERN")]
    glob_pattern: Option<String>,

    /// Output directory (default: config value, then the current directory)
    #[arg(short, long)]
    outdir: Option<PathBuf>,

    /// Skip docx-rs and read the document XML directly
    #[arg(long)]
    raw: bool,

    /// Report format
    #[arg(long, value_enum, default_value = "table")]
    format: ReportFormat,

    /// Load configuration from this file instead of the config directory
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the default configuration file and exit
    #[arg(long)]
    init_config: bool,

    /// Exit with a failure status if any input failed to convert
    #[arg(long)]
    strict: bool,

    /// Verbose logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.init_config {
        Config::init_default()?;
        if let Some(path) = Config::get_config_path() {
            println!("Default configuration written to: {}", path.display());
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let mut inputs = cli.inputs.clone();
    if let Some(pattern) = &cli.glob_pattern {
        inputs.extend(expand_glob(pattern)?);
    }

    if inputs.is_empty() {
        Cli::command()
            .error(
                clap::error::ErrorKind::MissingRequiredArgument,
                "No inputs provided. Specify files or use --glob '*.docx'.",
            )
            .exit();
    }

    let outdir = cli
        .outdir
        .clone()
        .or_else(|| config.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&outdir)
        .with_context(|| format!("Failed to create output directory {}", outdir.display()))?;

    let strategy = if cli.raw { Strategy::Raw } else { config.strategy };
    let converter = Converter::new(outdir)
        .with_strategy(strategy)
        .with_fences(config.fence_table());

    let entries = converter.convert_batch(&inputs);

    match cli.format {
        ReportFormat::Table => print!("{}", render_report(&entries)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
    }

    if cli.strict && entries.iter().any(|entry| entry.outcome.is_failure()) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .init();
}

/// Expand a glob pattern into the files it matches, in sorted order
fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let matches = glob::glob(pattern).with_context(|| format!("Invalid glob pattern: {pattern}"))?;

    let mut paths = Vec::new();
    for entry in matches {
        let path = entry.with_context(|| "Failed to read glob entry")?;
        paths.push(path);
    }
    Ok(paths)
}
