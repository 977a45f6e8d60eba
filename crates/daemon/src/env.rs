// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;

/// Resolve config file: RELAY_CONFIG > $XDG_CONFIG_HOME/relay/config.toml > ~/.config/relay/config.toml
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("RELAY_CONFIG") {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    dirs::config_dir().map(|dir| dir.join("relay").join("config.toml"))
}

/// Log filter override (tracing `EnvFilter` syntax), takes precedence over `logger.level`
pub fn log_filter() -> Option<String> {
    std::env::var("RELAY_LOG").ok().filter(|s| !s.is_empty())
}

/// CI API token override
pub fn ci_token() -> Option<String> {
    std::env::var("RELAY_CI_TOKEN").ok().filter(|s| !s.is_empty())
}

/// Chat bot token override
pub fn chat_token() -> Option<String> {
    std::env::var("RELAY_CHAT_TOKEN").ok().filter(|s| !s.is_empty())
}
