// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build references and build status snapshots.

use crate::result::BuildResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One numbered build of a job. Owned by the watcher following it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildRef {
    pub job_name: String,
    pub number: u64,
}

impl BuildRef {
    pub fn new(job_name: impl Into<String>, number: u64) -> Self {
        Self { job_name: job_name.into(), number }
    }
}

impl fmt::Display for BuildRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.job_name, self.number)
    }
}

/// Cause record attached to a build action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildCause {
    pub user_id: Option<String>,
}

/// Action record attached to a build. Only the causes are of interest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildAction {
    pub causes: Vec<BuildCause>,
}

/// Point-in-time status of a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStatus {
    /// Terminal result; `None` while the build is still running
    pub result: Option<BuildResult>,
    /// Start time in epoch milliseconds
    pub timestamp_ms: Option<i64>,
    pub display_name: Option<String>,
    pub duration_ms: u64,
    /// Build page URL, with trailing slash
    pub url: String,
    pub actions: Vec<BuildAction>,
}

impl BuildStatus {
    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }

    /// Identifier of the user who started the build.
    ///
    /// Taken from the first action whose leading cause names a user.
    pub fn triggering_user(&self) -> Option<&str> {
        self.actions.iter().find_map(|action| {
            let cause = action.causes.first()?;
            cause.user_id.as_deref().filter(|id| !id.is_empty())
        })
    }
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;
