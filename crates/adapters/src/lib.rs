// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Adapters for the CI server and the chat platform

pub mod chat;
pub mod ci;

pub use chat::{BotIdentity, ChatAdapter, ChatError, RichMessage, SlackAdapter, SlackConfig};
pub use ci::{CiAdapter, CiError, JenkinsAdapter, JenkinsConfig};

#[cfg(any(test, feature = "test-support"))]
pub use chat::{FakeChatAdapter, SentMessage};
#[cfg(any(test, feature = "test-support"))]
pub use ci::{CiCall, FakeCiAdapter};
