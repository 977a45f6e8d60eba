// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration, loaded from a TOML file.
//!
//! ```toml
//! [ci]
//! url = "https://ci.example.com"
//! user = "relay"
//! token = "..."
//!
//! [monitoring.job.delay]
//! min_ms = 5000
//! max_ms = 15000
//!
//! [chat]
//! token = "xoxb-..."
//! name = "Anna"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use relay_adapters::{JenkinsConfig, SlackConfig};
use relay_core::DelayWindow;
use serde::Deserialize;
use thiserror::Error;

use crate::engine::Timing;
use crate::env;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigPath,

    #[error("Failed to read config {0}: {1}")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config {0}: {1}")]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub ci: CiConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
    pub chat: ChatConfig,
    #[serde(default)]
    pub logger: LoggerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CiConfig {
    pub url: String,
    pub user: Option<String>,
    pub token: Option<String>,
    /// Upper bound on every CI request
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Jobs whose name contains this substring are not monitored (empty disables)
    #[serde(default = "default_exclude_substring")]
    pub exclude_substring: String,
    /// Parallel job lookups while seeding monitors at startup
    #[serde(default = "default_startup_concurrency")]
    pub startup_concurrency: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    #[serde(default = "default_loop")]
    pub job: LoopConfig,
    #[serde(default = "default_loop")]
    pub build: LoopConfig,
    #[serde(default = "default_report_interval_secs")]
    pub report_interval_secs: u64,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            job: default_loop(),
            build: default_loop(),
            report_interval_secs: default_report_interval_secs(),
        }
    }
}

/// Per-loop settings: the jitter window slept before each poll
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LoopConfig {
    pub delay: DelayWindow,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    pub token: String,
    /// Bot display name on posted messages
    #[serde(default = "default_bot_name")]
    pub name: String,
    pub icon_url: Option<String>,
    #[serde(default = "default_chat_api_url")]
    pub api_url: String,
    #[serde(default = "default_directory_refresh_secs")]
    pub directory_refresh_secs: u64,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggerConfig {
    /// Default filter, e.g. `info` or `relay_daemon=trace`
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log to this file instead of stderr
    pub file: Option<PathBuf>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file: None }
    }
}

fn default_request_timeout_ms() -> u64 {
    20_000
}

fn default_exclude_substring() -> String {
    "_OLD".to_string()
}

fn default_startup_concurrency() -> usize {
    3
}

fn default_loop() -> LoopConfig {
    LoopConfig { delay: DelayWindow::fixed(10_000) }
}

fn default_report_interval_secs() -> u64 {
    10
}

fn default_bot_name() -> String {
    "relay".to_string()
}

fn default_chat_api_url() -> String {
    "https://slack.com/api".to_string()
}

fn default_directory_refresh_secs() -> u64 {
    60 * 60
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the location resolved by [`env::config_path`].
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::config_path().ok_or(ConfigError::NoConfigPath)?;
        Self::from_file(&path)
    }

    /// Load, apply environment overrides and validate.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        let mut config: Config =
            toml::from_str(&text).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Some(token) = env::ci_token() {
            self.ci.token = Some(token);
        }
        if let Some(token) = env::chat_token() {
            self.chat.token = token;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ci.url.trim().is_empty() {
            return Err(ConfigError::Invalid("ci.url must not be empty".to_string()));
        }
        if self.chat.token.trim().is_empty() {
            return Err(ConfigError::Invalid("chat.token must not be empty".to_string()));
        }
        if self.ci.startup_concurrency == 0 {
            return Err(ConfigError::Invalid("ci.startup_concurrency must be at least 1".to_string()));
        }
        if self.ci.request_timeout_ms == 0 || self.chat.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid("request timeouts must be non-zero".to_string()));
        }
        if self.monitoring.report_interval_secs == 0 || self.chat.directory_refresh_secs == 0 {
            return Err(ConfigError::Invalid("intervals must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Whether a job is monitored under the exclusion rule
    pub fn is_monitored(&self, job_name: &str) -> bool {
        let exclude = &self.ci.exclude_substring;
        exclude.is_empty() || !job_name.contains(exclude.as_str())
    }

    pub fn jenkins(&self) -> JenkinsConfig {
        JenkinsConfig {
            url: self.ci.url.clone(),
            user: self.ci.user.clone(),
            token: self.ci.token.clone(),
            request_timeout: Duration::from_millis(self.ci.request_timeout_ms),
        }
    }

    pub fn slack(&self) -> SlackConfig {
        SlackConfig {
            token: self.chat.token.clone(),
            bot_name: self.chat.name.clone(),
            icon_url: self.chat.icon_url.clone(),
            api_url: self.chat.api_url.clone(),
            request_timeout: Duration::from_millis(self.chat.request_timeout_ms),
        }
    }

    pub fn timing(&self) -> Timing {
        Timing {
            job_delay: self.monitoring.job.delay,
            build_delay: self.monitoring.build.delay,
            report_interval: Duration::from_secs(self.monitoring.report_interval_secs),
            directory_refresh: Duration::from_secs(self.chat.directory_refresh_secs),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
