// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-build watcher: follows one build until it has a result, then tells
//! the user who started it.

use relay_adapters::{ChatAdapter, CiAdapter, CiError};
use relay_core::{BuildRef, BuildSummary, DelayWindow, MonitoringCounter};
use tracing::{debug, error, info};

use super::notify::{Delivery, Notifier};
use super::Pace;

/// Result of one status check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchOutcome {
    /// No result yet; check again later
    Running,
    /// Build finished. `delivery` is `None` when no user started it.
    Finished { delivery: Option<Delivery> },
}

pub struct BuildWatcher<C: CiAdapter, M: ChatAdapter> {
    build: BuildRef,
    ci: C,
    notifier: Notifier<M>,
    counter: MonitoringCounter,
    delay: DelayWindow,
}

impl<C: CiAdapter, M: ChatAdapter> BuildWatcher<C, M> {
    pub fn new(
        build: BuildRef,
        ci: C,
        notifier: Notifier<M>,
        counter: MonitoringCounter,
        delay: DelayWindow,
    ) -> Self {
        Self { build, ci, notifier, counter, delay }
    }

    /// Fetch the build once. On a terminal result, uncount the build and notify.
    pub async fn check_once(&self) -> Result<WatchOutcome, CiError> {
        let status = self.ci.get_build(&self.build.job_name, self.build.number).await?;
        debug!(job = %self.build.job_name, build = self.build.number, "checking build");

        let Some(summary) = BuildSummary::from_status(&self.build, &status) else {
            return Ok(WatchOutcome::Running);
        };
        self.counter.decrement();

        let Some(user) = status.triggering_user() else {
            info!(build = %self.build, result = %summary.result, "build finished, no triggering user");
            return Ok(WatchOutcome::Finished { delivery: None });
        };
        let message = summary.render();
        debug!(user, %message, "build finished");
        let delivery = self.notifier.notify_user(user, &message, &summary.result).await;
        Ok(WatchOutcome::Finished { delivery: Some(delivery) })
    }

    /// Poll until the build finishes or a non-timeout error occurs.
    pub async fn run(self) {
        let mut pace = Pace::Jittered;
        loop {
            pace.wait(self.delay).await;
            pace = match self.check_once().await {
                Ok(WatchOutcome::Running) => Pace::Jittered,
                Ok(WatchOutcome::Finished { .. }) => return,
                Err(e) => match Pace::after_error(&e) {
                    Some(next) => {
                        info!(build = %self.build, error = %e, "build check timed out, retrying");
                        next
                    }
                    None => {
                        error!(build = %self.build, error = %e, "build check failed, monitoring stopped");
                        return;
                    }
                },
            };
        }
    }
}

#[cfg(test)]
#[path = "build_watcher_tests.rs"]
mod tests;
