// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Slack Web API client.
//!
//! Uses `auth.test` as the connection signal, cursor-paginated `users.list`
//! for the directory, and `chat.postMessage` with a single colored attachment
//! for notifications.

use super::{BotIdentity, ChatAdapter, ChatError, RichMessage};
use async_trait::async_trait;
use relay_core::{Member, Severity};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Members fetched per `users.list` page
const PAGE_LIMIT: &str = "200";

/// Slack connection parameters
#[derive(Debug, Clone)]
pub struct SlackConfig {
    pub token: String,
    /// Display name used for posted messages
    pub bot_name: String,
    pub icon_url: Option<String>,
    /// Web API base, e.g. `https://slack.com/api`
    pub api_url: String,
    pub request_timeout: Duration,
}

#[derive(Clone)]
pub struct SlackAdapter {
    client: Client,
    config: SlackConfig,
}

impl SlackAdapter {
    pub fn new(config: SlackConfig) -> Result<Self, ChatError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ChatError::Request(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.config.api_url.trim_end_matches('/'), method)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        method: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ChatError> {
        let request = self
            .client
            .get(self.method_url(method))
            .bearer_auth(&self.config.token)
            .query(query);
        read_envelope(request.send().await).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<T, ChatError> {
        let request =
            self.client.post(self.method_url(method)).bearer_auth(&self.config.token).json(body);
        read_envelope(request.send().await).await
    }

    pub(crate) fn message_body<'a>(
        &'a self,
        handle: &'a str,
        message: &'a RichMessage,
    ) -> PostMessageBody<'a> {
        PostMessageBody {
            channel: handle,
            text: "",
            username: &self.config.bot_name,
            icon_url: self.config.icon_url.as_deref(),
            as_user: false,
            attachments: [Attachment {
                fallback: &message.text,
                color: attachment_color(message.severity),
                text: &message.text,
            }],
        }
    }
}

/// Slack attachment color for a severity
pub(crate) fn attachment_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Positive => "good",
        Severity::Negative => "danger",
        Severity::Neutral => "#439FE0",
    }
}

/// Check transport status and the `ok` flag every Web API response carries.
async fn read_envelope<T: DeserializeOwned>(
    sent: Result<reqwest::Response, reqwest::Error>,
) -> Result<T, ChatError> {
    let response = sent.map_err(|e| ChatError::Request(e.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(ChatError::Status(status.as_u16()));
    }
    let body: serde_json::Value =
        response.json().await.map_err(|e| ChatError::Decode(e.to_string()))?;
    parse_envelope(body)
}

pub(crate) fn parse_envelope<T: DeserializeOwned>(body: serde_json::Value) -> Result<T, ChatError> {
    let envelope: Envelope =
        serde_json::from_value(body.clone()).map_err(|e| ChatError::Decode(e.to_string()))?;
    if !envelope.ok {
        return Err(ChatError::Api(envelope.error.unwrap_or_else(|| "unknown_error".to_string())));
    }
    serde_json::from_value(body).map_err(|e| ChatError::Decode(e.to_string()))
}

#[async_trait]
impl ChatAdapter for SlackAdapter {
    async fn connect(&self) -> Result<BotIdentity, ChatError> {
        let auth: AuthTestJson = self.post("auth.test", &serde_json::json!({})).await?;
        Ok(BotIdentity { user_id: auth.user_id, name: auth.user, team: auth.team })
    }

    async fn list_members(&self) -> Result<Vec<Member>, ChatError> {
        let mut members = Vec::new();
        let mut cursor = String::new();
        loop {
            let mut query = vec![("limit", PAGE_LIMIT)];
            if !cursor.is_empty() {
                query.push(("cursor", cursor.as_str()));
            }
            let page: UsersListJson = self.get("users.list", &query).await?;
            members.extend(page.members.into_iter().filter_map(MemberJson::into_member));
            cursor = page.response_metadata.map(|m| m.next_cursor).unwrap_or_default();
            if cursor.is_empty() {
                break;
            }
        }
        Ok(members)
    }

    async fn send_direct_message(
        &self,
        handle: &str,
        message: &RichMessage,
    ) -> Result<(), ChatError> {
        let body = self.message_body(handle, message);
        let _: serde_json::Value = self.post("chat.postMessage", &body).await?;
        Ok(())
    }
}

// ── Wire types ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct Envelope {
    ok: bool,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthTestJson {
    user_id: String,
    user: String,
    team: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UsersListJson {
    #[serde(default)]
    pub members: Vec<MemberJson>,
    pub response_metadata: Option<ResponseMetadataJson>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseMetadataJson {
    #[serde(default)]
    pub next_cursor: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MemberJson {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub profile: ProfileJson,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProfileJson {
    pub email: Option<String>,
}

impl MemberJson {
    /// Deactivated accounts cannot receive messages and are dropped here.
    pub(crate) fn into_member(self) -> Option<Member> {
        if self.deleted {
            return None;
        }
        Some(Member { id: self.id, name: self.name, email: self.profile.email })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct PostMessageBody<'a> {
    pub channel: &'a str,
    pub text: &'a str,
    pub username: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<&'a str>,
    pub as_user: bool,
    pub attachments: [Attachment<'a>; 1],
}

#[derive(Debug, Serialize)]
pub(crate) struct Attachment<'a> {
    pub fallback: &'a str,
    pub color: &'static str,
    pub text: &'a str,
}

#[cfg(test)]
#[path = "slack_tests.rs"]
mod tests;
