// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable build completion summaries.

use crate::build::{BuildRef, BuildStatus};
use crate::result::BuildResult;
use chrono::{Local, TimeZone};
use std::fmt::Display;

/// Start time format used in summaries (month-day, 24h clock)
const STARTED_FORMAT: &str = "%m-%d %H:%M:%S";

/// Everything needed to describe a finished build to its user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub build: BuildRef,
    pub result: BuildResult,
    pub started_at_ms: Option<i64>,
    pub display_name: Option<String>,
    pub url: String,
    pub duration_ms: u64,
}

impl BuildSummary {
    /// Build a summary from a finished build. Returns `None` while the build is running.
    pub fn from_status(build: &BuildRef, status: &BuildStatus) -> Option<Self> {
        let result = status.result.clone()?;
        Some(Self {
            build: build.clone(),
            result,
            started_at_ms: status.timestamp_ms.filter(|ms| *ms != 0),
            display_name: status.display_name.clone().filter(|name| !name.is_empty()),
            url: status.url.clone(),
            duration_ms: status.duration_ms,
        })
    }

    /// Render the summary with start times in the local time zone.
    pub fn render(&self) -> String {
        self.render_in(&Local)
    }

    /// Render the summary with start times in the given time zone.
    ///
    /// `Build result for demo 6 started on 03-14 09:26:53 for #6 is SUCCESS: <url>console`
    /// followed by a `Duration: <seconds> sec` line.
    pub fn render_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let mut message = format!("Build result for {} {}", self.build.job_name, self.build.number);
        if let Some(started) = self.started_at_ms.and_then(|ms| tz.timestamp_millis_opt(ms).single())
        {
            message.push_str(&format!(" started on {}", started.format(STARTED_FORMAT)));
        }
        if let Some(name) = &self.display_name {
            message.push_str(&format!(" for {}", name));
        }
        message.push_str(&format!(
            " is {}: {}console\nDuration: {} sec",
            self.result,
            self.url,
            self.duration_ms as f64 / 1000.0
        ));
        message
    }
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
