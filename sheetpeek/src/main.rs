use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sheetpeek_core::config::DEFAULT_CONFIG_FILE;
use sheetpeek_core::report::render;
use sheetpeek_core::{Config, Inspector};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheetpeek")]
#[command(about = "Print sheet extents, header rows and sample rows of Excel/ODS workbooks", long_about = None)]
#[command(version)]
struct Cli {
    /// Workbooks to inspect (defaults to `files` from the config)
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Directory that relative file paths are resolved against
    #[arg(long, value_name = "DIR")]
    base_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Plain text report
    Human,
    /// JSON output
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        // Try to load default config from current directory if it exists
        let default_config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
        if default_config_path.exists() {
            Config::from_file(&default_config_path).with_context(|| {
                format!(
                    "Failed to load config from {}",
                    default_config_path.display()
                )
            })?
        } else {
            Config::default()
        }
    };

    if cli.base_dir.is_some() {
        config.base_dir = cli.base_dir.clone();
    }

    config.validate().context("Invalid configuration")?;

    let files = config.resolve_files(&cli.files);
    if files.is_empty() {
        tracing::info!("no workbooks to inspect");
    }

    let inspector = Inspector::with_config(config.preview);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.format {
        OutputFormat::Human => {
            let summary = inspector
                .run_batch(files.as_slice(), &mut out)
                .context("Inspection aborted")?;
            tracing::info!(
                inspected = summary.inspected,
                missing = summary.missing,
                "done"
            );
        }
        OutputFormat::Json => {
            let reports = inspector
                .collect_batch(files.as_slice())
                .context("Inspection aborted")?;
            render::write_json(&mut out, &reports)?;
            out.flush()?;
        }
    }

    Ok(())
}
