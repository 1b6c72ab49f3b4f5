use anyhow::{Context, Result};
use clap::Parser;
use devconnect_infrastructure::DevConnectPaths;

mod bootstrap;
mod cli;
mod commands;
mod helper;
mod logging;
mod render;
mod repl;

use cli::Args;

/// Entry point for the Dev Connect REPL.
///
/// Resolves the config directory, installs file logging, connects to Gemini
/// (or starts offline when no key is configured) and hands over to the loop.
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let paths = DevConnectPaths::new(args.config_dir.as_deref());

    let logs_dir = paths.logs_dir().context("Cannot resolve log directory")?;
    let _log_guard = logging::init(&logs_dir, args.log_level.as_deref())?;

    let booted = bootstrap::bootstrap(&args, &paths).await?;
    repl::run(booted.service, booted.status).await?;

    tracing::info!("[Main] Session ended");
    Ok(())
}
