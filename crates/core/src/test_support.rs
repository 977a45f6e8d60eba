// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{BuildAction, BuildCause, BuildResult, BuildStatus, JobInfo, Member};

// ── Proptest strategies ─────────────────────────────────────────────────

pub mod strategies {
    use crate::BuildResult;
    use proptest::prelude::*;

    pub fn arb_build_result() -> impl Strategy<Value = BuildResult> {
        prop_oneof![
            Just(BuildResult::Success),
            Just(BuildResult::Failure),
            Just(BuildResult::Unstable),
            Just(BuildResult::Aborted),
            Just(BuildResult::NotBuilt),
            "[A-Z_]{1,12}".prop_map(|code| BuildResult::from(code.as_str())),
        ]
    }
}

// ── Factory functions ───────────────────────────────────────────────────

pub fn job_info(name: &str, last_build_number: Option<u64>) -> JobInfo {
    JobInfo { name: name.to_string(), last_build_number, description: None }
}

/// A build that has not produced a result yet.
pub fn running_build(job: &str, number: u64) -> BuildStatus {
    BuildStatus {
        result: None,
        timestamp_ms: Some(1_700_000_000_000),
        display_name: Some(format!("#{number}")),
        duration_ms: 0,
        url: format!("https://ci.example.com/job/{job}/{number}/"),
        actions: vec![],
    }
}

/// A finished build, optionally started by `user_id`.
pub fn finished_build(
    job: &str,
    number: u64,
    result: BuildResult,
    user_id: Option<&str>,
) -> BuildStatus {
    let actions = match user_id {
        Some(id) => vec![BuildAction {
            causes: vec![BuildCause { user_id: Some(id.to_string()) }],
        }],
        None => vec![],
    };
    BuildStatus { result: Some(result), duration_ms: 42_000, actions, ..running_build(job, number) }
}

pub fn member(id: &str, email: Option<&str>) -> Member {
    Member { id: id.to_string(), name: id.to_lowercase(), email: email.map(str::to_string) }
}
