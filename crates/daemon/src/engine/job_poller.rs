// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-job poller: spots new build numbers and hands them to build watchers.

use relay_adapters::{ChatAdapter, CiAdapter, CiError};
use relay_core::{BuildRef, MonitoredJob};
use tracing::{debug, error, trace, warn};

use super::{Monitor, Pace};

pub struct JobPoller<C: CiAdapter, M: ChatAdapter> {
    job: MonitoredJob,
    monitor: Monitor<C, M>,
}

impl<C: CiAdapter, M: ChatAdapter> JobPoller<C, M> {
    pub fn new(job: MonitoredJob, monitor: Monitor<C, M>) -> Self {
        Self { job, monitor }
    }

    pub fn job(&self) -> &MonitoredJob {
        &self.job
    }

    /// Fetch the job once and advance its last-seen build number.
    ///
    /// Returns the builds that appeared since the previous poll, ascending.
    pub async fn poll_once(&mut self) -> Result<Vec<BuildRef>, CiError> {
        let info = self.monitor.ci().get_job(&self.job.name).await?;
        let Some(latest) = info.last_build_number else {
            trace!(job = %self.job.name, "no build data, skipping");
            return Ok(Vec::new());
        };
        trace!(job = %self.job.name, latest, last = self.job.last_seen(), "checking job");
        Ok(self.job.observe(latest))
    }

    /// Poll until a non-timeout error. Never returns otherwise.
    pub async fn run(mut self) {
        let window = self.monitor.timing().job_delay;
        let mut pace = Pace::Jittered;
        loop {
            pace.wait(window).await;
            pace = match self.poll_once().await {
                Ok(builds) => {
                    for build in builds {
                        debug!(job = %build.job_name, build = build.number, "adding build to monitor");
                        self.monitor.spawn_build_watcher(build);
                    }
                    Pace::Jittered
                }
                Err(e) => match Pace::after_error(&e) {
                    Some(next) => {
                        warn!(job = %self.job.name, error = %e, "job check timed out, retrying");
                        next
                    }
                    None => {
                        error!(job = %self.job.name, error = %e, "job check failed, monitoring stopped");
                        return;
                    }
                },
            };
        }
    }
}

#[cfg(test)]
#[path = "job_poller_tests.rs"]
mod tests;
