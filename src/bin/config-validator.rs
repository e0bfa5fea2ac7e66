//! # TodoList Configuration Validator
//!
//! Loads a configuration file the same way the servers do, applies
//! environment overrides, validates it and prints the result with secrets
//! redacted.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use todolist::config::{AppConfig, ConfigLoader};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Toml,
    Json,
}

#[derive(Parser)]
#[command(name = "config-validator")]
#[command(about = "Validate TodoList configuration files")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Configuration file (default: TODOLIST_CONFIG_PATH or config/todolist.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format for the sanitized configuration
    #[arg(long, value_enum, default_value = "toml")]
    format: OutputFormat,

    /// Only report success or failure
    #[arg(short, long)]
    quiet: bool,

    /// Verbose output level (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn render(config: &AppConfig, format: OutputFormat) -> anyhow::Result<String> {
    let sanitized = config.sanitized();
    Ok(match format {
        OutputFormat::Toml => toml::to_string_pretty(&sanitized)?,
        OutputFormat::Json => serde_json::to_string_pretty(&sanitized)?,
    })
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let loaded = match &cli.config {
        Some(path) => ConfigLoader::load_from_path(path),
        None => ConfigLoader::load(),
    };

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Configuration is invalid");
            eprintln!("❌ {e}");
            process::exit(1);
        }
    };
    info!(environment = %config.environment, "Configuration is valid");

    if cli.quiet {
        println!("✅ Configuration is valid");
        return;
    }

    match render(&config, cli.format) {
        Ok(output) => {
            println!("✅ Configuration is valid (environment: {})\n", config.environment);
            println!("{output}");
        }
        Err(e) => {
            eprintln!("❌ Failed to render configuration: {e}");
            process::exit(1);
        }
    }
}
