// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Monitoring engine: job pollers, build watchers, the user directory and
//! the notification dispatcher.
//!
//! Every loop is a tokio task that sleeps a jittered delay, does one unit of
//! work, and decides how to continue. A CI timeout skips the next delay; any
//! other CI error ends the loop for good.

mod build_watcher;
mod directory;
mod job_poller;
mod notify;
mod reporter;

pub use build_watcher::{BuildWatcher, WatchOutcome};
pub use directory::{DirectoryHandle, DirectoryRefresher};
pub use job_poller::JobPoller;
pub use notify::{Delivery, Notifier};
pub use reporter::spawn_count_reporter;

use std::time::Duration;

use relay_adapters::{ChatAdapter, CiAdapter, CiError};
use relay_core::{BuildRef, DelayWindow, MonitoredJob, MonitoringCounter};
use tokio::task::JoinHandle;

/// Loop timing knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub job_delay: DelayWindow,
    pub build_delay: DelayWindow,
    pub report_interval: Duration,
    pub directory_refresh: Duration,
}

/// How a loop waits before its next iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    /// Sleep a random delay drawn from the loop's window
    Jittered,
    /// Retry right away, only yielding to other tasks
    Immediate,
}

impl Pace {
    pub async fn wait(self, window: DelayWindow) {
        match self {
            Pace::Jittered => {
                let delay = window.sample(&mut rand::thread_rng());
                tokio::time::sleep(delay).await;
            }
            Pace::Immediate => tokio::task::yield_now().await,
        }
    }

    /// Continuation after a failed CI request: timeouts retry immediately,
    /// everything else stops the loop.
    pub fn after_error(error: &CiError) -> Option<Pace> {
        error.is_timeout().then_some(Pace::Immediate)
    }
}

/// Shared context for spawning pollers and watchers.
#[derive(Clone)]
pub struct Monitor<C: CiAdapter, M: ChatAdapter> {
    ci: C,
    notifier: Notifier<M>,
    counter: MonitoringCounter,
    timing: Timing,
}

impl<C: CiAdapter, M: ChatAdapter> Monitor<C, M> {
    pub fn new(ci: C, notifier: Notifier<M>, counter: MonitoringCounter, timing: Timing) -> Self {
        Self { ci, notifier, counter, timing }
    }

    pub fn ci(&self) -> &C {
        &self.ci
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Start the poller for one job.
    pub fn spawn_job_poller(&self, job: MonitoredJob) -> JoinHandle<()> {
        tokio::spawn(JobPoller::new(job, self.clone()).run())
    }

    /// Start following one build. Counts the build as monitored.
    pub fn spawn_build_watcher(&self, build: BuildRef) -> JoinHandle<()> {
        self.counter.increment();
        let watcher = BuildWatcher::new(
            build,
            self.ci.clone(),
            self.notifier.clone(),
            self.counter.clone(),
            self.timing.build_delay,
        );
        tokio::spawn(watcher.run())
    }
}

#[cfg(test)]
pub(crate) mod test_helpers;
