// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! relay-core: Domain types for the CI build relay

pub mod macros;

pub mod build;
pub mod delay;
pub mod directory;
pub mod job;
pub mod metrics;
pub mod result;
pub mod summary;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use build::{BuildAction, BuildCause, BuildRef, BuildStatus};
pub use delay::{DelayWindow, DelayWindowError};
pub use directory::{Directory, DirectoryEntry, Member};
pub use job::{JobInfo, MonitoredJob};
pub use metrics::MonitoringCounter;
pub use result::{BuildResult, Severity};
pub use summary::BuildSummary;
