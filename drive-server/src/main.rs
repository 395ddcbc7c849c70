//! drive-server - browse a OneDrive / SharePoint drive over HTTP.
//!
//! # Examples
//!
//! ```bash
//! # Write a configuration template
//! drive-server --conf config.yaml new
//!
//! # Serve the drive described in config.yaml
//! drive-server --conf config.yaml
//!
//! # Take the configuration from TENANT_ID, APP_ID, CLI_SECRET, DRIVE_ID, LISTEN
//! drive-server --env
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use core_runtime::logging::{init_logging, LogFormat, LogLevel, LoggingConfig};
use core_runtime::DriveConfig;
use drive_server::{build_router, serve, shutdown_signal, state::AppState};
use tokio::net::TcpListener;
use tracing::info;

// ============================================================================
// CLI Definition
// ============================================================================

/// Directory index for a OneDrive / SharePoint drive.
#[derive(Parser)]
#[command(name = "drive-server")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Configuration file.
    #[arg(long, default_value = "config.yaml", global = true)]
    conf: PathBuf,

    /// Read the configuration from environment variables instead of a file.
    #[arg(long)]
    env: bool,

    /// Log output format.
    #[arg(long, value_enum, default_value = "pretty", global = true)]
    log_format: LogFormatArg,

    /// Verbose output (debug level logs).
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Write a configuration template to the --conf path and exit.
    New,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
            LogFormatArg::Compact => LogFormat::Compact,
        }
    }
}

// ============================================================================
// Entry point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    init_logging(
        LoggingConfig::default()
            .with_format(cli.log_format.into())
            .with_level(level),
    )?;

    if let Some(Command::New) = cli.command {
        return write_template(&cli.conf);
    }

    let config = if cli.env {
        DriveConfig::from_env()
    } else {
        DriveConfig::load(&cli.conf)
            .with_context(|| format!("failed to load {}", cli.conf.display()))?
    };

    let index = core_service::bootstrap(&config)
        .await
        .context("failed to connect to the drive")?;

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(%addr, "Listening");

    serve(listener, build_router(AppState::new(index)), shutdown_signal()).await?;

    info!("Bye!");
    Ok(())
}

fn write_template(path: &Path) -> Result<()> {
    let yaml = DriveConfig::template().to_yaml()?;
    std::fs::write(path, yaml).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "Configuration template written");
    Ok(())
}
