//! File logging for the REPL.
//!
//! Logs go to a daily rolling file under the Parley data directory so they
//! never interleave with the prompt. `RUST_LOG` takes precedence over the
//! `--log-level` flag.

use anyhow::{Context, Result};
use parley_infrastructure::ParleyPaths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "parley.log";

/// Installs the global subscriber. Keep the returned guard alive for the
/// life of the process or buffered lines are lost.
pub fn init(level: &str) -> Result<WorkerGuard> {
    let log_dir = ParleyPaths::log_dir()?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))?;

    tracing::info!("[Parley] Logging to {}", log_dir.display());
    Ok(guard)
}
