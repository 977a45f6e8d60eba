// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Monitoring counter shared between build watchers and the count reporter.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Number of build watchers currently following a build.
///
/// Observability only: nothing makes control decisions on it. Clones share
/// the same count.
#[derive(Debug, Clone, Default)]
pub struct MonitoringCounter {
    active: Arc<AtomicI64>,
}

impl MonitoringCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self) {
        self.active.fetch_add(1, Ordering::Relaxed);
    }

    pub fn decrement(&self) {
        self.active.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> i64 {
        self.active.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_count() {
        let counter = MonitoringCounter::new();
        let other = counter.clone();
        counter.increment();
        counter.increment();
        other.decrement();
        assert_eq!(counter.get(), 1);
        assert_eq!(other.get(), 1);
    }
}
