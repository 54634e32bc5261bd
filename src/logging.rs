//! File-based logging.
//!
//! The terminal belongs to the menus and the player screen, so tracing output
//! goes to a daily rolling file instead of stdout.

use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingSettings;

const LOG_FILE_PREFIX: &str = "spotipy";

/// Initialize the logging system.
///
/// Logs are written to `<directory>/spotipy.YYYY-MM-DD`. `RUST_LOG`
/// overrides the configured filter. The returned guard flushes the
/// background writer on drop and must be held for the life of the process.
pub fn init(settings: &LoggingSettings) -> Result<WorkerGuard, Box<dyn std::error::Error>> {
    fs::create_dir_all(&settings.directory)?;

    let file_appender =
        RollingFileAppender::new(Rotation::DAILY, &settings.directory, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .unwrap_or_else(|_| EnvFilter::new("spotipy=info"));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!(dir = %settings.directory.display(), "logging initialized");
    Ok(guard)
}
