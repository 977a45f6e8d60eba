// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal build results and their notification severity.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Terminal result of a build, as reported by the CI server.
///
/// Unknown result codes are kept verbatim in [`BuildResult::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BuildResult {
    Success,
    Failure,
    Unstable,
    Aborted,
    NotBuilt,
    Other(String),
}

impl BuildResult {
    pub fn as_str(&self) -> &str {
        match self {
            BuildResult::Success => "SUCCESS",
            BuildResult::Failure => "FAILURE",
            BuildResult::Unstable => "UNSTABLE",
            BuildResult::Aborted => "ABORTED",
            BuildResult::NotBuilt => "NOT_BUILT",
            BuildResult::Other(code) => code,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            BuildResult::Success => Severity::Positive,
            BuildResult::Failure => Severity::Negative,
            _ => Severity::Neutral,
        }
    }
}

impl From<&str> for BuildResult {
    fn from(code: &str) -> Self {
        match code {
            "SUCCESS" => BuildResult::Success,
            "FAILURE" => BuildResult::Failure,
            "UNSTABLE" => BuildResult::Unstable,
            "ABORTED" => BuildResult::Aborted,
            "NOT_BUILT" => BuildResult::NotBuilt,
            other => BuildResult::Other(other.to_string()),
        }
    }
}

impl fmt::Display for BuildResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BuildResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BuildResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(BuildResult::from(code.as_str()))
    }
}

/// Visual severity of a build notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Positive,
    Negative,
    Neutral,
}

crate::simple_display! {
    Severity {
        Positive => "positive",
        Negative => "negative",
        Neutral => "neutral",
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
