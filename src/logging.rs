//! Logging setup
//!
//! Installs the global `tracing` subscriber from `[logging]`:
//! pretty or JSON lines on stderr, plus an optional JSON log file.
//! `RUST_LOG` takes precedence over the configured level.

use std::ffi::OsStr;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{ConfigError, LoggingConfig};

/// Log output style on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::Invalid(format!(
                "unknown log format '{}', expected pretty or json",
                other
            ))),
        }
    }
}

/// Default filter directive for a configured level
pub fn default_directive(level: &str) -> String {
    format!("bikeshare={level},tower_http={level}")
}

/// Install the global subscriber
///
/// The returned guard flushes the log file on drop and must be held for
/// the lifetime of the process.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>, ConfigError> {
    let format = LogFormat::parse(&config.format)?;
    let filter = || {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.level)))
    };

    let pretty_layer = (format == LogFormat::Pretty).then(|| {
        fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
            .with_filter(filter())
    });

    let json_layer = (format == LogFormat::Json).then(|| {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_writer(std::io::stderr)
            .with_filter(filter())
    });

    let (file_layer, guard) = match &config.file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path.file_name().unwrap_or(OsStr::new("bikeshare.log"));
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            let layer = fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(filter());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(pretty_layer)
        .with(json_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}
