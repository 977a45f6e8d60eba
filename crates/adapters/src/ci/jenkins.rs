// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Jenkins JSON API client.
//!
//! Requests use the `tree` query parameter so Jenkins only serializes the
//! fields the relay reads. Folder jobs (`team/app`) map to nested `/job/` paths.

use super::{CiAdapter, CiError};
use async_trait::async_trait;
use relay_core::{BuildAction, BuildCause, BuildResult, BuildStatus, JobInfo};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const LIST_TREE: &str = "jobs[name]";
const JOB_TREE: &str = "description,lastBuild[number]";
const BUILD_TREE: &str = "result,timestamp,displayName,duration,url,actions[causes[userId]]";

/// Connection parameters for a Jenkins server
#[derive(Debug, Clone)]
pub struct JenkinsConfig {
    pub url: String,
    pub user: Option<String>,
    pub token: Option<String>,
    pub request_timeout: Duration,
}

#[derive(Clone)]
pub struct JenkinsAdapter {
    client: Client,
    base: Url,
    user: Option<String>,
    token: Option<String>,
    request_timeout: Duration,
}

impl JenkinsAdapter {
    pub fn new(config: JenkinsConfig) -> Result<Self, CiError> {
        let base = Url::parse(&config.url)
            .map_err(|e| CiError::Request(format!("invalid Jenkins URL {}: {}", config.url, e)))?;
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| CiError::Request(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base,
            user: config.user,
            token: config.token,
            request_timeout: config.request_timeout,
        })
    }

    /// `<base>/job/<a>/job/<b>/<extra...>/api/json?tree=<tree>`
    fn api_url(&self, job: Option<&str>, extra: &[&str], tree: &str) -> Result<Url, CiError> {
        let mut url = self.base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                CiError::Request(format!("Jenkins URL {} cannot be a base", self.base))
            })?;
            segments.pop_if_empty();
            for part in job.into_iter().flat_map(|name| name.split('/')).filter(|p| !p.is_empty()) {
                segments.push("job").push(part);
            }
            segments.extend(extra).push("api").push("json");
        }
        url.query_pairs_mut().append_pair("tree", tree);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CiError> {
        tokio::time::timeout(self.request_timeout, self.fetch(url))
            .await
            .map_err(|_| CiError::Timeout(self.request_timeout))?
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, CiError> {
        tracing::trace!(%url, "jenkins request");
        let mut request = self.client.get(url.clone());
        if let Some(user) = &self.user {
            request = request.basic_auth(user, self.token.as_ref());
        }
        let response = request.send().await.map_err(|e| classify(e, self.request_timeout))?;
        let status = response.status();
        if !status.is_success() {
            return Err(CiError::Status { status: status.as_u16(), url: url.to_string() });
        }
        response.json().await.map_err(|e| classify(e, self.request_timeout))
    }
}

fn classify(error: reqwest::Error, timeout: Duration) -> CiError {
    if error.is_timeout() {
        CiError::Timeout(timeout)
    } else if error.is_decode() {
        CiError::Decode(error.to_string())
    } else {
        CiError::Request(error.to_string())
    }
}

#[async_trait]
impl CiAdapter for JenkinsAdapter {
    async fn list_jobs(&self) -> Result<Vec<String>, CiError> {
        let url = self.api_url(None, &[], LIST_TREE)?;
        let list: JobListJson = self.get_json(url).await?;
        Ok(list.jobs.into_iter().map(|j| j.name).collect())
    }

    async fn get_job(&self, name: &str) -> Result<JobInfo, CiError> {
        let url = self.api_url(Some(name), &[], JOB_TREE)?;
        let job: JobJson = self.get_json(url).await?;
        Ok(job.into_info(name))
    }

    async fn get_build(&self, job: &str, number: u64) -> Result<BuildStatus, CiError> {
        let number_segment = number.to_string();
        let url = self.api_url(Some(job), &[&number_segment], BUILD_TREE)?;
        let build: BuildJson = self.get_json(url).await?;
        Ok(build.into())
    }
}

// ── Wire types ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct JobListJson {
    #[serde(default)]
    pub jobs: Vec<JobNameJson>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobNameJson {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JobJson {
    pub description: Option<String>,
    pub last_build: Option<BuildNumberJson>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BuildNumberJson {
    pub number: u64,
}

impl JobJson {
    /// Folder jobs report their short name; keep the full path the job was requested by.
    pub(crate) fn into_info(self, requested: &str) -> JobInfo {
        JobInfo {
            name: requested.to_string(),
            last_build_number: self.last_build.map(|b| b.number),
            description: self.description.filter(|d| !d.is_empty()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BuildJson {
    pub result: Option<BuildResult>,
    pub timestamp: Option<i64>,
    pub display_name: Option<String>,
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub actions: Vec<Option<ActionJson>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ActionJson {
    #[serde(default)]
    pub causes: Vec<CauseJson>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CauseJson {
    pub user_id: Option<String>,
}

impl From<BuildJson> for BuildStatus {
    fn from(build: BuildJson) -> Self {
        BuildStatus {
            result: build.result,
            timestamp_ms: build.timestamp,
            display_name: build.display_name,
            duration_ms: build.duration,
            url: build.url,
            actions: build
                .actions
                .into_iter()
                .map(|action| BuildAction {
                    causes: action
                        .unwrap_or_default()
                        .causes
                        .into_iter()
                        .map(|c| BuildCause { user_id: c.user_id })
                        .collect(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "jenkins_tests.rs"]
mod tests;
