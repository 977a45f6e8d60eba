// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Chat platform adapter

mod slack;

pub use slack::{SlackAdapter, SlackConfig};

use async_trait::async_trait;
use relay_core::{Member, Severity};
use thiserror::Error;

/// Errors from chat platform operations
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("API error: {0}")]
    Api(String),
    #[error("invalid response: {0}")]
    Decode(String),
}

/// Identity the bot connected as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotIdentity {
    pub user_id: String,
    pub name: String,
    pub team: Option<String>,
}

/// A direct message with a severity-colored body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichMessage {
    pub text: String,
    pub severity: Severity,
}

/// Adapter for the chat platform
#[async_trait]
pub trait ChatAdapter: Clone + Send + Sync + 'static {
    /// Establish the connection and report who we are
    async fn connect(&self) -> Result<BotIdentity, ChatError>;

    /// Full member list of the workspace
    async fn list_members(&self) -> Result<Vec<Member>, ChatError>;

    /// Send a direct message to the member addressed by `handle`
    async fn send_direct_message(&self, handle: &str, message: &RichMessage)
        -> Result<(), ChatError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{BotIdentity, ChatAdapter, ChatError, RichMessage};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use relay_core::Member;
    use std::collections::VecDeque;
    use std::sync::Arc;

    /// Recorded direct message
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SentMessage {
        pub handle: String,
        pub message: RichMessage,
    }

    #[derive(Default)]
    struct FakeChatState {
        connects: usize,
        connect_failure: Option<ChatError>,
        member_lists: usize,
        members: Vec<Member>,
        list_failures: VecDeque<ChatError>,
        fail_sends: bool,
        sent: Vec<SentMessage>,
    }

    /// Fake chat adapter for testing
    #[derive(Clone, Default)]
    pub struct FakeChatAdapter {
        inner: Arc<Mutex<FakeChatState>>,
    }

    impl FakeChatAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        /// Replace the member list served by `list_members`
        pub fn set_members(&self, members: Vec<Member>) {
            self.inner.lock().members = members;
        }

        /// Make the next `list_members` call fail
        pub fn fail_next_list(&self, error: ChatError) {
            self.inner.lock().list_failures.push_back(error);
        }

        /// Make the next `connect` call fail
        pub fn fail_connect(&self, error: ChatError) {
            self.inner.lock().connect_failure = Some(error);
        }

        /// Make every `send_direct_message` call fail
        pub fn fail_sends(&self) {
            self.inner.lock().fail_sends = true;
        }

        /// Get all delivered messages
        pub fn sent(&self) -> Vec<SentMessage> {
            self.inner.lock().sent.clone()
        }

        pub fn connects(&self) -> usize {
            self.inner.lock().connects
        }

        pub fn member_lists(&self) -> usize {
            self.inner.lock().member_lists
        }
    }

    #[async_trait]
    impl ChatAdapter for FakeChatAdapter {
        async fn connect(&self) -> Result<BotIdentity, ChatError> {
            let mut inner = self.inner.lock();
            inner.connects += 1;
            if let Some(error) = inner.connect_failure.take() {
                return Err(error);
            }
            Ok(BotIdentity { user_id: "UBOT".to_string(), name: "relay".to_string(), team: None })
        }

        async fn list_members(&self) -> Result<Vec<Member>, ChatError> {
            let mut inner = self.inner.lock();
            inner.member_lists += 1;
            if let Some(error) = inner.list_failures.pop_front() {
                return Err(error);
            }
            Ok(inner.members.clone())
        }

        async fn send_direct_message(
            &self,
            handle: &str,
            message: &RichMessage,
        ) -> Result<(), ChatError> {
            let mut inner = self.inner.lock();
            if inner.fail_sends {
                return Err(ChatError::Api("channel_not_found".to_string()));
            }
            inner.sent.push(SentMessage { handle: handle.to_string(), message: message.clone() });
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeChatAdapter, SentMessage};
