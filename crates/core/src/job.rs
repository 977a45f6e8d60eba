// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Monitored job state.

use crate::build::BuildRef;
use serde::{Deserialize, Serialize};

/// Job descriptor as reported by the CI server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobInfo {
    pub name: String,
    /// Number of the most recent build, `None` if the job was never built
    pub last_build_number: Option<u64>,
    pub description: Option<String>,
}

/// A job under watch.
///
/// The last-seen build number only moves forward, through [`MonitoredJob::observe`].
/// Each job is owned by exactly one poller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitoredJob {
    pub name: String,
    pub description: Option<String>,
    last_seen: u64,
}

impl MonitoredJob {
    pub fn new(name: impl Into<String>, last_seen: u64) -> Self {
        Self { name: name.into(), description: None, last_seen }
    }

    /// Seed a job from its startup descriptor. Jobs that were never built start at 0,
    /// so their first build gets watched.
    pub fn from_info(info: JobInfo) -> Self {
        Self {
            name: info.name,
            description: info.description,
            last_seen: info.last_build_number.unwrap_or(0),
        }
    }

    pub fn last_seen(&self) -> u64 {
        self.last_seen
    }

    /// Record the latest build number reported by the CI server.
    ///
    /// Returns one reference per build in `(last_seen, latest]`, ascending, and
    /// advances `last_seen` to `latest`. A stale or equal number returns nothing
    /// and leaves the state untouched.
    pub fn observe(&mut self, latest: u64) -> Vec<BuildRef> {
        if latest <= self.last_seen {
            return Vec::new();
        }
        let builds =
            (self.last_seen + 1..=latest).map(|number| BuildRef::new(&self.name, number)).collect();
        self.last_seen = latest;
        builds
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
