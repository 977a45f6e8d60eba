// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification dispatcher: resolves a triggering user to a chat handle and
//! sends the build summary.

use relay_adapters::{ChatAdapter, RichMessage};
use relay_core::BuildResult;
use tracing::{debug, warn};

use super::directory::DirectoryHandle;

/// What happened to a notification. Failures never propagate further.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Sent to this handle
    Sent(String),
    /// The user is not in the directory; nothing was sent
    UnknownUser,
    /// The chat platform rejected the message
    Failed,
}

#[derive(Clone)]
pub struct Notifier<M: ChatAdapter> {
    chat: M,
    directory: DirectoryHandle,
}

impl<M: ChatAdapter> Notifier<M> {
    pub fn new(chat: M, directory: DirectoryHandle) -> Self {
        Self { chat, directory }
    }

    pub async fn notify_user(&self, email: &str, message: &str, result: &BuildResult) -> Delivery {
        let Some(entry) = self.directory.lookup(email) else {
            return Delivery::UnknownUser;
        };
        let rich = RichMessage { text: message.to_string(), severity: result.severity() };
        match self.chat.send_direct_message(&entry.handle, &rich).await {
            Ok(()) => {
                debug!(email, handle = %entry.handle, "user notified");
                Delivery::Sent(entry.handle)
            }
            Err(e) => {
                warn!(email, handle = %entry.handle, error = %e, "notification failed");
                Delivery::Failed
            }
        }
    }
}

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
