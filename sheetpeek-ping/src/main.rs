use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use sheetpeek_core::Config;
use sheetpeek_core::config::DEFAULT_CONFIG_FILE;
use sheetpeek_core::generate::{self, GenerateReply};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheetpeek-ping")]
#[command(about = "Send one prompt to a local generative-text API and print the reply", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML); endpoint settings live under [generate]
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// API host
    #[arg(long)]
    host: Option<String>,

    /// API port
    #[arg(long)]
    port: Option<u16>,

    /// Model name
    #[arg(short, long)]
    model: Option<String>,

    /// Prompt text
    #[arg(short, long)]
    prompt: Option<String>,

    /// Request timeout in seconds (no timeout by default)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .or_else(|| Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()));
    let mut config = match &config_path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    let generate_config = &mut config.generate;
    if let Some(host) = cli.host {
        generate_config.host = host;
    }
    if let Some(port) = cli.port {
        generate_config.port = port;
    }
    if let Some(model) = cli.model {
        generate_config.model = model;
    }
    if let Some(prompt) = cli.prompt {
        generate_config.prompt = prompt;
    }
    if cli.timeout.is_some() {
        generate_config.timeout_secs = cli.timeout;
    }

    config.validate().context("Invalid configuration")?;

    let reply = generate::send_generate(&config.generate).with_context(|| {
        format!(
            "Generate request to {} failed",
            generate::endpoint_url(&config.generate)
        )
    })?;

    print_reply(&reply);
    Ok(())
}

fn print_reply(reply: &GenerateReply) {
    let status = if reply.is_success() {
        reply.status_line().green().bold()
    } else {
        reply.status_line().red().bold()
    };
    println!("{}", status);
    println!("{}", reply.body);
}
