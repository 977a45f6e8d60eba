// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing subscriber setup.

use std::path::Path;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use crate::config::LoggerConfig;
use crate::env;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter '{0}': {1}")]
    Filter(String, String),

    #[error("invalid log file path: {0}")]
    FilePath(String),

    #[error("failed to install subscriber: {0}")]
    Install(String),
}

/// Resolve the effective filter: `RELAY_LOG` wins over `logger.level`.
pub fn filter_directive(config: &LoggerConfig) -> String {
    env::log_filter().unwrap_or_else(|| config.level.clone())
}

/// Install the global subscriber.
///
/// With `logger.file` set, output goes through a non-blocking file writer and
/// the returned guard must be held for the life of the process so buffered
/// lines are flushed on exit.
pub fn init(config: &LoggerConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let directive = filter_directive(config);
    let filter =
        EnvFilter::try_new(&directive).map_err(|e| LoggingError::Filter(directive, e.to_string()))?;

    match &config.file {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let invalid =
                |reason: String| LoggingError::FilePath(format!("{}: {reason}", path.display()));
            let file_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| invalid("not a UTF-8 file name".to_string()))?;
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(file_name)
                .build(dir)
                .map_err(|e| invalid(e.to_string()))?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init()
                .map_err(|e| LoggingError::Install(e.to_string()))?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| LoggingError::Install(e.to_string()))?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn env_filter_overrides_config_level() {
        let config = LoggerConfig { level: "info".to_string(), file: None };

        std::env::remove_var("RELAY_LOG");
        assert_eq!(filter_directive(&config), "info");

        std::env::set_var("RELAY_LOG", "relay_daemon=trace");
        let directive = filter_directive(&config);
        std::env::remove_var("RELAY_LOG");
        assert_eq!(directive, "relay_daemon=trace");
    }

    #[test]
    #[serial]
    fn invalid_filter_is_rejected() {
        std::env::remove_var("RELAY_LOG");
        let config = LoggerConfig { level: "relay=loud".to_string(), file: None };
        assert!(matches!(init(&config), Err(LoggingError::Filter(..))));
    }

    #[test]
    #[serial]
    fn unwritable_log_file_is_an_error() {
        std::env::remove_var("RELAY_LOG");
        let config = LoggerConfig {
            level: "info".to_string(),
            file: Some("/proc/relay-missing/relay.log".into()),
        };
        assert!(matches!(init(&config), Err(LoggingError::FilePath(_))));
    }
}
