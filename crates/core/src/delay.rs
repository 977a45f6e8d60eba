// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Randomized delay windows used to jitter poll loops.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DelayWindowError {
    #[error("delay window min ({min_ms}ms) exceeds max ({max_ms}ms)")]
    Inverted { min_ms: u64, max_ms: u64 },
}

/// A `[min, max)` window in milliseconds. `min == max` yields a fixed delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWindow", into = "RawWindow")]
pub struct DelayWindow {
    min_ms: u64,
    max_ms: u64,
}

#[derive(Serialize, Deserialize)]
struct RawWindow {
    min_ms: u64,
    max_ms: u64,
}

impl TryFrom<RawWindow> for DelayWindow {
    type Error = DelayWindowError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        DelayWindow::new(raw.min_ms, raw.max_ms)
    }
}

impl From<DelayWindow> for RawWindow {
    fn from(window: DelayWindow) -> Self {
        RawWindow { min_ms: window.min_ms, max_ms: window.max_ms }
    }
}

impl DelayWindow {
    pub fn new(min_ms: u64, max_ms: u64) -> Result<Self, DelayWindowError> {
        if min_ms > max_ms {
            return Err(DelayWindowError::Inverted { min_ms, max_ms });
        }
        Ok(Self { min_ms, max_ms })
    }

    /// Fixed delay, for tests and degenerate configurations.
    pub fn fixed(ms: u64) -> Self {
        Self { min_ms: ms, max_ms: ms }
    }

    pub fn min_ms(&self) -> u64 {
        self.min_ms
    }

    pub fn max_ms(&self) -> u64 {
        self.max_ms
    }

    /// Draw one delay uniformly from the window.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.min_ms == self.max_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rng.gen_range(self.min_ms..self.max_ms))
    }
}

#[cfg(test)]
#[path = "delay_tests.rs"]
mod tests;
