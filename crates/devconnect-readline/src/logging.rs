//! File-only tracing setup.
//!
//! The REPL owns the terminal, so events go to a daily rolling file under
//! `<config dir>/logs/` instead of stdout.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "devconnect.log";

/// Builds the filter: explicit flag first, then `RUST_LOG`, then `info`.
pub fn build_filter(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("Invalid log filter '{directives}'")),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))),
    }
}

/// Installs the global subscriber.
///
/// The returned guard flushes buffered lines on drop and must live until exit.
pub fn init(log_dir: &Path, level: Option<&str>) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(build_filter(level)?)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!("[Logging] Writing to {}", log_dir.join(LOG_FILE_PREFIX).display());
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_filter_is_parsed() {
        assert!(build_filter(Some("debug")).is_ok());
        assert!(build_filter(Some("devconnect_interaction=trace,info")).is_ok());
    }

    #[test]
    fn test_invalid_filter_is_rejected() {
        assert!(build_filter(Some("devconnect=loudest")).is_err());
    }
}
