// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon startup: wires the adapters into the engine and starts every loop.

use futures_util::stream::{self, StreamExt, TryStreamExt};
use relay_adapters::{ChatAdapter, CiAdapter};
use relay_core::{MonitoredJob, MonitoringCounter};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::engine::{spawn_count_reporter, DirectoryHandle, DirectoryRefresher, Monitor, Notifier};

use super::{LifecycleError, RunningDaemon};

/// Start the daemon
///
/// 1. Connect to chat (failure is logged only) and start the directory refresher
/// 2. List jobs and drop excluded ones
/// 3. Start the count reporter
/// 4. Fetch each job's details and start its poller
pub async fn startup<C: CiAdapter, M: ChatAdapter>(
    config: &Config,
    ci: C,
    chat: M,
) -> Result<RunningDaemon, LifecycleError> {
    let mut tasks = Vec::new();
    match startup_inner(config, ci, chat, &mut tasks).await {
        Ok((jobs, counter, directory)) => Ok(RunningDaemon { jobs, counter, directory, tasks }),
        Err(e) => {
            for task in &tasks {
                task.abort();
            }
            Err(e)
        }
    }
}

/// Inner startup logic. Tasks pushed before a failure are aborted by the caller.
async fn startup_inner<C: CiAdapter, M: ChatAdapter>(
    config: &Config,
    ci: C,
    chat: M,
    tasks: &mut Vec<JoinHandle<()>>,
) -> Result<(Vec<String>, MonitoringCounter, DirectoryHandle), LifecycleError> {
    let timing = config.timing();

    // Monitoring does not depend on chat; the refresher keeps retrying
    match chat.connect().await {
        Ok(bot) => {
            info!(bot = %bot.name, id = %bot.user_id, team = ?bot.team, "connected to chat")
        }
        Err(e) => warn!(error = %e, "chat connection failed"),
    }

    let directory = DirectoryHandle::new();
    tasks.push(
        DirectoryRefresher::new(chat.clone(), directory.clone(), timing.directory_refresh).spawn(),
    );

    let jobs: Vec<String> = ci
        .list_jobs()
        .await
        .map_err(LifecycleError::JobList)?
        .into_iter()
        .filter(|name| config.is_monitored(name))
        .collect();

    let counter = MonitoringCounter::new();
    tasks.push(spawn_count_reporter(counter.clone(), timing.report_interval));
    info!(jobs = %jobs.join(", "), "monitoring jobs");

    // Seed last-seen numbers, a few requests at a time
    let infos: Vec<_> = stream::iter(jobs.iter().cloned())
        .map(|name| {
            let ci = ci.clone();
            async move {
                ci.get_job(&name).await.map_err(|source| LifecycleError::JobFetch { name, source })
            }
        })
        .buffered(config.ci.startup_concurrency.max(1))
        .try_collect()
        .await?;

    let monitor = Monitor::new(ci, Notifier::new(chat, directory.clone()), counter.clone(), timing);
    for info in infos {
        let job = MonitoredJob::from_info(info);
        debug!(job = %job.name, last_seen = job.last_seen(), "starting job poller");
        tasks.push(monitor.spawn_job_poller(job));
    }

    Ok((jobs, counter, directory))
}

#[cfg(test)]
#[path = "startup_tests.rs"]
mod tests;
