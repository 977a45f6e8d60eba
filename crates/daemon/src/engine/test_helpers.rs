// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for the engine.

use std::time::Duration;

use relay_adapters::{FakeChatAdapter, FakeCiAdapter};
use relay_core::test_support::member;
use relay_core::{BuildRef, DelayWindow, Directory, MonitoringCounter};

use super::{BuildWatcher, DirectoryHandle, Monitor, Notifier, Timing};

/// Convenience alias for the fully-typed test monitor.
pub(crate) type TestMonitor = Monitor<FakeCiAdapter, FakeChatAdapter>;

/// Every jittered wait in tests is exactly this long.
pub(crate) const TICK: Duration = Duration::from_millis(1000);

pub(crate) fn test_timing() -> Timing {
    Timing {
        job_delay: DelayWindow::fixed(TICK.as_millis() as u64),
        build_delay: DelayWindow::fixed(TICK.as_millis() as u64),
        report_interval: Duration::from_secs(10),
        directory_refresh: Duration::from_secs(3600),
    }
}

/// Test context holding the monitor and the fakes behind it.
pub(crate) struct TestContext {
    pub monitor: TestMonitor,
    pub ci: FakeCiAdapter,
    pub chat: FakeChatAdapter,
    pub directory: DirectoryHandle,
    pub counter: MonitoringCounter,
}

impl TestContext {
    pub fn notifier(&self) -> Notifier<FakeChatAdapter> {
        Notifier::new(self.chat.clone(), self.directory.clone())
    }

    /// A watcher for `build`, counted as monitored like a spawned one.
    pub fn watcher(&self, build: BuildRef) -> BuildWatcher<FakeCiAdapter, FakeChatAdapter> {
        self.counter.increment();
        BuildWatcher::new(
            build,
            self.ci.clone(),
            self.notifier(),
            self.counter.clone(),
            test_timing().build_delay,
        )
    }
}

/// Create a monitor over fake adapters with a directory of `(handle, email)` users.
pub(crate) fn setup_with_users(users: &[(&str, &str)]) -> TestContext {
    let ci = FakeCiAdapter::new();
    let chat = FakeChatAdapter::new();
    let directory = DirectoryHandle::new();
    directory.replace(Directory::from_members(
        users.iter().map(|&(handle, email)| member(handle, Some(email))),
    ));
    let counter = MonitoringCounter::new();
    let monitor = Monitor::new(
        ci.clone(),
        Notifier::new(chat.clone(), directory.clone()),
        counter.clone(),
        test_timing(),
    );
    TestContext { monitor, ci, chat, directory, counter }
}

pub(crate) fn setup() -> TestContext {
    setup_with_users(&[("U1", "alice@example.com")])
}

/// Let spawned tasks run for `duration` of (paused) tokio time.
pub(crate) async fn run_for(duration: Duration) {
    tokio::time::sleep(duration).await;
}
