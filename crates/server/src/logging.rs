//! Logging setup: stderr plus a non-blocking log file.

use std::path::PathBuf;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::ServerConfig;

const LOG_FILE: &str = "zone-server.log";

/// Installs the global subscriber.
///
/// The returned guard flushes the file writer when dropped; keep it alive for
/// the whole process.
pub fn setup_logging(config: &ServerConfig) -> Result<WorkerGuard> {
    let log_dir = config.log_dir.clone().unwrap_or_else(default_log_dir);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    tracing::info!("Log file: {}/{}", log_dir.display(), LOG_FILE);
    Ok(guard)
}

/// Platform cache directory for logs.
///
/// - Linux: `$XDG_CACHE_HOME/zone-server/logs` or `~/.cache/zone-server/logs`
/// - macOS: `~/Library/Caches/zone-server/logs`
/// - Windows: `%LOCALAPPDATA%\zone-server\logs`
/// - Fallback: `/tmp/zone-server/logs`
pub fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "zone-server")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/zone-server"))
        .join("logs")
}
