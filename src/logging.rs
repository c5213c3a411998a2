//! File logging. The terminal belongs to the UI, so nothing goes to stdout.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_PREFIX: &str = "pokecatalog";

/// Flushes buffered log lines when dropped; hold it for the life of `main`.
#[allow(dead_code)]
pub struct LoggerGuard(WorkerGuard);

/// `<data_local_dir>/pokecatalog/logs`, or `./logs` when the platform has none.
pub fn default_log_dir() -> PathBuf {
    dirs_next::data_local_dir()
        .map(|dir| dir.join(LOG_PREFIX).join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Parse a level name, falling back to `info` for anything unknown.
pub fn level_directive(level: &str) -> Directive {
    match level.to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::TRACE.into(),
        "debug" => LevelFilter::DEBUG.into(),
        "info" => LevelFilter::INFO.into(),
        "warn" => LevelFilter::WARN.into(),
        "error" => LevelFilter::ERROR.into(),
        "off" => LevelFilter::OFF.into(),
        _ => LevelFilter::INFO.into(),
    }
}

pub fn init(log_dir: impl AsRef<Path>, level: &str) -> io::Result<LoggerGuard> {
    let log_dir = log_dir.as_ref();
    fs::create_dir_all(log_dir)?;

    let filter = EnvFilter::builder()
        .with_default_directive(level_directive(level))
        .parse_lossy(std::env::var("RUST_LOG").unwrap_or_default());

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix("log")
        .build(log_dir)
        .map_err(|err| io::Error::other(format!("log appender: {err}")))?;
    let (non_blocking, guard) = NonBlocking::new(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .map_err(|err| io::Error::other(format!("log subscriber: {err}")))?;

    tracing::info!(dir = %log_dir.display(), "logging initialised");
    Ok(LoggerGuard(guard))
}
