// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CI server adapter

mod jenkins;

pub use jenkins::{JenkinsAdapter, JenkinsConfig};

use async_trait::async_trait;
use relay_core::{BuildStatus, JobInfo};
use std::time::Duration;
use thiserror::Error;

/// Errors from CI server requests.
///
/// Callers only distinguish timeouts (retryable) from everything else.
#[derive(Debug, Error)]
pub enum CiError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("request failed: {0}")]
    Request(String),
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },
    #[error("invalid response: {0}")]
    Decode(String),
}

impl CiError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, CiError::Timeout(_))
    }
}

/// Adapter for the CI server's job and build API.
///
/// Every call is bounded by the adapter's request timeout.
#[async_trait]
pub trait CiAdapter: Clone + Send + Sync + 'static {
    /// Names of all jobs on the server
    async fn list_jobs(&self) -> Result<Vec<String>, CiError>;

    /// Current descriptor of one job, including its latest build number
    async fn get_job(&self, name: &str) -> Result<JobInfo, CiError>;

    /// Current status of one build
    async fn get_build(&self, job: &str, number: u64) -> Result<BuildStatus, CiError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{CiAdapter, CiError};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use relay_core::{BuildStatus, JobInfo};
    use std::collections::{HashMap, VecDeque};
    use std::sync::Arc;

    /// Recorded CI request
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum CiCall {
        ListJobs,
        GetJob(String),
        GetBuild(String, u64),
    }

    #[derive(Default)]
    struct FakeCiState {
        calls: Vec<CiCall>,
        jobs: Vec<JobInfo>,
        list_failure: Option<CiError>,
        job_script: HashMap<String, VecDeque<Result<JobInfo, CiError>>>,
        builds: HashMap<(String, u64), BuildStatus>,
        build_script: HashMap<(String, u64), VecDeque<Result<BuildStatus, CiError>>>,
    }

    /// Fake CI adapter for testing.
    ///
    /// Scripted responses are served first, in order. Once a script runs dry the
    /// adapter answers with the static job/build registered via `add_job`/`set_build`,
    /// or a 404 when there is none.
    #[derive(Clone, Default)]
    pub struct FakeCiAdapter {
        inner: Arc<Mutex<FakeCiState>>,
    }

    impl FakeCiAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        /// Register a job for listing and as the steady-state `get_job` answer
        pub fn add_job(&self, info: JobInfo) {
            let mut inner = self.inner.lock();
            inner.jobs.retain(|j| j.name != info.name);
            inner.jobs.push(info);
        }

        /// Make the next `list_jobs` call fail
        pub fn fail_list(&self, error: CiError) {
            self.inner.lock().list_failure = Some(error);
        }

        /// Queue one `get_job` response
        pub fn push_job_response(&self, name: &str, response: Result<JobInfo, CiError>) {
            self.inner.lock().job_script.entry(name.to_string()).or_default().push_back(response);
        }

        /// Set the steady-state `get_build` answer
        pub fn set_build(&self, job: &str, number: u64, status: BuildStatus) {
            self.inner.lock().builds.insert((job.to_string(), number), status);
        }

        /// Queue one `get_build` response
        pub fn push_build_response(
            &self,
            job: &str,
            number: u64,
            response: Result<BuildStatus, CiError>,
        ) {
            self.inner
                .lock()
                .build_script
                .entry((job.to_string(), number))
                .or_default()
                .push_back(response);
        }

        /// Get all recorded calls
        pub fn calls(&self) -> Vec<CiCall> {
            self.inner.lock().calls.clone()
        }

        /// Number of `get_build` calls for one build
        pub fn build_polls(&self, job: &str, number: u64) -> usize {
            self.inner
                .lock()
                .calls
                .iter()
                .filter(|c| matches!(c, CiCall::GetBuild(j, n) if j == job && *n == number))
                .count()
        }

        /// Number of `get_job` calls for one job
        pub fn job_polls(&self, name: &str) -> usize {
            self.inner
                .lock()
                .calls
                .iter()
                .filter(|c| matches!(c, CiCall::GetJob(j) if j == name))
                .count()
        }
    }

    #[async_trait]
    impl CiAdapter for FakeCiAdapter {
        async fn list_jobs(&self) -> Result<Vec<String>, CiError> {
            let mut inner = self.inner.lock();
            inner.calls.push(CiCall::ListJobs);
            if let Some(error) = inner.list_failure.take() {
                return Err(error);
            }
            Ok(inner.jobs.iter().map(|j| j.name.clone()).collect())
        }

        async fn get_job(&self, name: &str) -> Result<JobInfo, CiError> {
            let mut inner = self.inner.lock();
            inner.calls.push(CiCall::GetJob(name.to_string()));
            if let Some(response) = inner.job_script.get_mut(name).and_then(VecDeque::pop_front) {
                return response;
            }
            inner.jobs.iter().find(|j| j.name == name).cloned().ok_or_else(|| CiError::Status {
                status: 404,
                url: format!("fake://job/{name}"),
            })
        }

        async fn get_build(&self, job: &str, number: u64) -> Result<BuildStatus, CiError> {
            let mut inner = self.inner.lock();
            inner.calls.push(CiCall::GetBuild(job.to_string(), number));
            let key = (job.to_string(), number);
            if let Some(response) = inner.build_script.get_mut(&key).and_then(VecDeque::pop_front) {
                return response;
            }
            inner.builds.get(&key).cloned().ok_or_else(|| CiError::Status {
                status: 404,
                url: format!("fake://job/{job}/{number}"),
            })
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{CiCall, FakeCiAdapter};
