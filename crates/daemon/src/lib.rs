// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CI build relay daemon
//!
//! Polls the CI server for new builds, follows each build to completion and
//! messages the user who started it.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod config;
pub mod engine;
pub mod env;
pub mod lifecycle;
pub mod logging;

pub use config::{Config, ConfigError};
pub use lifecycle::{startup, wait_for_shutdown, LifecycleError, RunningDaemon};
