//! Logging subsystem built on tracing.
//!
//! Installs a console layer and an optional file layer behind a reloadable
//! `EnvFilter`, so the level can be changed at runtime through the handle
//! returned by [`init_logger`].

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt, reload};

/// Logger errors
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Invalid log level '{0}'")]
    InvalidLevel(String),

    #[error("Failed to open log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to initialize logger: {0}")]
    Init(String),
}

/// Output format for the file layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Full,
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(format!(
                "Invalid log format '{}'. Valid formats are: full, compact, json",
                other
            )),
        }
    }
}

/// Console output configuration.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub enabled: bool,
    pub colored: bool,
}

/// File output configuration.
#[derive(Debug, Clone)]
pub struct FileConfig {
    pub enabled: bool,
    pub path: PathBuf,
    pub format: LogFormat,
}

/// Runtime logger configuration.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub level: String,
    pub console: ConsoleConfig,
    pub file: FileConfig,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console: ConsoleConfig {
                enabled: true,
                colored: true,
            },
            file: FileConfig {
                enabled: false,
                path: PathBuf::from("logs/fixly.log"),
                format: LogFormat::Json,
            },
        }
    }
}

/// Handle for changing the log level after initialization.
pub struct LogLevelHandle {
    handle: reload::Handle<EnvFilter, Registry>,
}

impl LogLevelHandle {
    /// Replace the active filter with a new level directive.
    pub fn set_level(&self, level: &str) -> Result<(), LoggerError> {
        let filter =
            EnvFilter::try_new(level).map_err(|_| LoggerError::InvalidLevel(level.to_string()))?;
        self.handle
            .reload(filter)
            .map_err(|e| LoggerError::Init(e.to_string()))
    }
}

/// Initialize the global tracing subscriber.
///
/// Environment directives in `RUST_LOG` style are accepted for the level
/// (`info`, `fixly=debug,tower_http=warn`, ...). Returns a handle for
/// runtime level changes. Fails if a global subscriber is already set.
pub fn init_logger(config: LoggerConfig) -> Result<LogLevelHandle, LoggerError> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|_| LoggerError::InvalidLevel(config.level.clone()))?;
    let (filter, handle) = reload::Layer::new(filter);

    let console_layer = config
        .console
        .enabled
        .then(|| fmt::layer().with_ansi(config.console.colored).boxed());

    let file_layer = if config.file.enabled {
        if let Some(parent) = config.file.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.file.path)?;
        let writer = Arc::new(file);

        let layer = match config.file.format {
            LogFormat::Json => fmt::layer().json().with_ansi(false).with_writer(writer).boxed(),
            LogFormat::Compact => fmt::layer()
                .compact()
                .with_ansi(false)
                .with_writer(writer)
                .boxed(),
            LogFormat::Full => fmt::layer().with_ansi(false).with_writer(writer).boxed(),
        };
        Some(layer)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggerError::Init(e.to_string()))?;

    Ok(LogLevelHandle { handle })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_formats() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("Compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert_eq!("FULL".parse::<LogFormat>().unwrap(), LogFormat::Full);
        assert!("yaml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn default_config_is_console_only() {
        let config = LoggerConfig::default();
        assert!(config.console.enabled);
        assert!(!config.file.enabled);
        assert_eq!(config.level, "info");
    }

    // Only one test may install the global subscriber; it covers file
    // output and the reload handle together.
    #[test]
    fn init_writes_to_file_and_reloads_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixly.log");

        let config = LoggerConfig {
            level: "debug".to_string(),
            console: ConsoleConfig {
                enabled: false,
                colored: false,
            },
            file: FileConfig {
                enabled: true,
                path: path.clone(),
                format: LogFormat::Json,
            },
        };

        let handle = init_logger(config).expect("logger should initialize");
        tracing::info!(test = true, "file layer smoke test");
        handle.set_level("warn").expect("level reload should work");
        assert!(handle.set_level("not a directive !!").is_err());

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("file layer smoke test"));
    }
}
