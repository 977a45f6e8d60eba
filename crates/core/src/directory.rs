// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Chat user directory: triggering-user identifier (email) to chat handle.
//!
//! A directory is an immutable snapshot. Refreshes build a new one from the
//! full member list and swap it in wholesale.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Chat platform member as listed by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Platform user id, addressable for direct messages
    pub id: String,
    pub name: String,
    pub email: Option<String>,
}

/// A contactable directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub handle: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    by_email: HashMap<String, DirectoryEntry>,
}

impl Directory {
    /// Build a snapshot from a member list. Members without an email are dropped.
    pub fn from_members(members: impl IntoIterator<Item = Member>) -> Self {
        let by_email = members
            .into_iter()
            .filter_map(|member| {
                let email = member.email.filter(|e| !e.is_empty())?;
                let entry = DirectoryEntry { handle: member.id, name: member.name, email };
                Some((entry.email.clone(), entry))
            })
            .collect();
        Self { by_email }
    }

    /// Exact-match lookup by email.
    pub fn lookup(&self, email: &str) -> Option<&DirectoryEntry> {
        self.by_email.get(email)
    }

    pub fn len(&self) -> usize {
        self.by_email.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_email.is_empty()
    }
}

#[cfg(test)]
#[path = "directory_tests.rs"]
mod tests;
