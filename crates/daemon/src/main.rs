// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! relayd: CI build relay daemon

use std::process::ExitCode;

use relay_adapters::{JenkinsAdapter, SlackAdapter};
use relay_daemon::{logging, startup, wait_for_shutdown, Config};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("relayd: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Held until exit so buffered log lines get flushed
    let _log_guard = match logging::init(&config.logger) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("relayd: {e}");
            return ExitCode::FAILURE;
        }
    };

    let ci = match JenkinsAdapter::new(config.jenkins()) {
        Ok(ci) => ci,
        Err(e) => {
            error!(error = %e, "invalid CI configuration");
            return ExitCode::FAILURE;
        }
    };
    let chat = match SlackAdapter::new(config.slack()) {
        Ok(chat) => chat,
        Err(e) => {
            error!(error = %e, "invalid chat configuration");
            return ExitCode::FAILURE;
        }
    };

    info!(version = env!("CARGO_PKG_VERSION"), ci = %config.ci.url, "starting relayd");
    let daemon = match startup(&config, ci, chat).await {
        Ok(daemon) => daemon,
        Err(e) => {
            error!(error = %e, "startup failed");
            return ExitCode::FAILURE;
        }
    };

    let result = wait_for_shutdown().await;
    daemon.shutdown();
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "shutdown signal handling failed");
            ExitCode::FAILURE
        }
    }
}
