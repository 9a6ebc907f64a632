//! # thot-cli
//!
//! Command-line interface for the Thot packaging-manifest toolkit.
//!
//! This is the main entry point for the `thot` binary. It handles command
//! parsing, sets up logging and error handling, and dispatches to the
//! appropriate command handlers.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use thot_core::error::ThotResult;
use tracing::{error, info};

mod commands;
mod output;

use commands::CommandContext;

/// Packaging-manifest toolkit for Thot distributions
#[derive(Parser)]
#[command(name = "thot", version, about = "Thot packaging-manifest toolkit")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a thot.toml in the current directory
    Init,
    /// Validate the project manifest
    Check,
    /// Print the resolved metadata record
    Show {
        /// Print as JSON instead of the human-readable form
        #[arg(long)]
        json: bool,
    },
    /// Write normalized metadata for build tooling
    Emit {
        /// Output format (json or toml)
        #[arg(long, default_value = "json")]
        format: String,
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<Utf8PathBuf>,
    },
    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    info!("Starting thot v{}", env!("CARGO_PKG_VERSION"));

    if run_cli(cli).is_err() {
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> ThotResult<()> {
    // Create Tokio runtime for async manifest IO
    let rt = tokio::runtime::Runtime::new().map_err(|e| {
        thot_core::error::ThotError::Io {
            message: "Failed to create async runtime".to_string(),
            source: e,
        }
    })?;

    rt.block_on(async {
        let ctx = CommandContext::new()?;

        let result = commands::dispatch_command(cli.command, &ctx).await;

        if let Err(ref e) = result {
            ctx.output.error(&e.to_string());
            if let Some(suggestion) = e.suggestion() {
                ctx.output.info(suggestion);
            }
        }

        result
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "thot={},thot_manifest={},thot_core={}",
            level, level, level
        ))
        .with_target(false)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("thot encountered an unexpected error: {}", panic_info);
        eprintln!("thot crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/bicarlsen/thot-data/issues");
        eprintln!("Error: {}", panic_info);
    }));
}
