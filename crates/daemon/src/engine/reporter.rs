// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Periodic log line with the number of builds under watch.

use std::time::Duration;

use relay_core::MonitoringCounter;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

/// Log the number of monitored builds every `interval`, starting one interval from now.
pub fn spawn_count_reporter(counter: MonitoringCounter, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
        loop {
            ticker.tick().await;
            debug!(builds = counter.get(), "monitoring builds");
        }
    })
}

#[cfg(test)]
#[path = "reporter_tests.rs"]
mod tests;
