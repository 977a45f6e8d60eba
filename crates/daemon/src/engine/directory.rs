// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared user directory and its periodic refresher.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use relay_adapters::{ChatAdapter, ChatError};
use relay_core::{Directory, DirectoryEntry};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// Shared handle to the current directory snapshot.
///
/// Readers clone what they need out of the snapshot; the refresher replaces
/// the whole snapshot in one store.
#[derive(Clone, Default)]
pub struct DirectoryHandle {
    current: Arc<RwLock<Arc<Directory>>>,
}

impl DirectoryHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Arc<Directory> {
        self.current.read().clone()
    }

    pub fn lookup(&self, email: &str) -> Option<DirectoryEntry> {
        self.current.read().lookup(email).cloned()
    }

    pub fn replace(&self, directory: Directory) {
        *self.current.write() = Arc::new(directory);
    }
}

pub struct DirectoryRefresher<M: ChatAdapter> {
    chat: M,
    directory: DirectoryHandle,
    interval: Duration,
}

impl<M: ChatAdapter> DirectoryRefresher<M> {
    pub fn new(chat: M, directory: DirectoryHandle, interval: Duration) -> Self {
        Self { chat, directory, interval }
    }

    /// Rebuild the directory from the full member list. Returns the number of
    /// contactable users.
    pub async fn refresh_once(&self) -> Result<usize, ChatError> {
        let members = self.chat.list_members().await?;
        let directory = Directory::from_members(members);
        let users = directory.len();
        self.directory.replace(directory);
        Ok(users)
    }

    /// Refresh now, then every interval. A failed refresh keeps the previous
    /// snapshot.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match self.refresh_once().await {
                    Ok(users) => debug!(users, "users data updated"),
                    Err(e) => warn!(error = %e, "user directory refresh failed"),
                }
            }
        })
    }
}

#[cfg(test)]
#[path = "directory_tests.rs"]
mod tests;
