//! Command implementations and dispatch logic.
//!
//! Each command is implemented as an async function that takes a
//! CommandContext with the working directory and output handler.

use camino::Utf8PathBuf;
use thot_core::error::{ThotError, ThotResult};
use tracing::info;

pub mod check;
pub mod emit;
pub mod init;
pub mod show;


use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: Utf8PathBuf,
    pub output: OutputHandler,
}

impl CommandContext {
    /// Create a new command context
    pub fn new() -> ThotResult<Self> {
        let cwd = std::env::current_dir().map_err(|e| ThotError::Io {
            message: "Failed to get current directory".to_string(),
            source: e,
        })?;

        let cwd = Utf8PathBuf::from_path_buf(cwd).map_err(|path| {
            ThotError::validation(
                "cwd",
                format!("Working directory is not valid UTF-8: {}", path.display()),
            )
        })?;

        Ok(Self {
            cwd,
            output: OutputHandler::new(),
        })
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> ThotResult<()> {
    match command {
        Commands::Init => {
            info!("Initializing manifest in current directory");
            init::execute(ctx).await
        },
        Commands::Check => {
            info!("Checking project manifest");
            check::execute(ctx).await
        },
        Commands::Show { json } => {
            info!("Showing resolved metadata (json: {})", json);
            show::execute(json, ctx).await
        },
        Commands::Emit { format, out } => {
            info!("Emitting metadata (format: {}, out: {:?})", format, out);
            emit::execute(format, out, ctx).await
        },
        Commands::Version => {
            info!("Showing version information");
            show_version(ctx)
        },
    }
}

fn show_version(ctx: &CommandContext) -> ThotResult<()> {
    let version = env!("CARGO_PKG_VERSION");
    let build_date = env!("BUILD_DATE");
    let target = format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS);

    ctx.output.info(&format!("thot v{}", version));
    ctx.output.info(&format!("Built: {}", build_date));
    ctx.output.info(&format!("Target: {}", target));
    ctx.output.info(&format!("Rust: {}", env!("RUSTC_VERSION")));

    Ok(())
}
