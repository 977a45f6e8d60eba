// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup and shutdown.

mod startup;
pub use startup::startup;

use relay_adapters::CiError;
use relay_core::MonitoringCounter;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::info;

use crate::engine::DirectoryHandle;

/// A started daemon: every loop is running in the background.
pub struct RunningDaemon {
    /// Names of the monitored jobs, in listing order
    pub jobs: Vec<String>,
    pub counter: MonitoringCounter,
    pub directory: DirectoryHandle,
    tasks: Vec<JoinHandle<()>>,
}

impl RunningDaemon {
    /// Stop the long-lived loops. Build watchers die with the runtime.
    pub fn shutdown(self) {
        for task in &self.tasks {
            task.abort();
        }
        info!(builds = self.counter.get(), "daemon stopped");
    }
}

/// Errors that prevent the daemon from starting.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("could not list jobs: {0}")]
    JobList(#[source] CiError),

    #[error("could not fetch job {name}: {source}")]
    JobFetch {
        name: String,
        #[source]
        source: CiError,
    },

    #[error("signal handler: {0}")]
    Signal(#[from] std::io::Error),
}

/// Wait for Ctrl-C, or SIGTERM on unix.
pub async fn wait_for_shutdown() -> Result<(), LifecycleError> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut term = signal(SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result?,
            _ = term.recv() => {}
        }
    }
    #[cfg(not(unix))]
    tokio::signal::ctrl_c().await?;
    info!("shutdown requested");
    Ok(())
}
