// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn adapter(url: &str, timeout: Duration) -> JenkinsAdapter {
    JenkinsAdapter::new(JenkinsConfig {
        url: url.to_string(),
        user: Some("relay".to_string()),
        token: Some("secret".to_string()),
        request_timeout: timeout,
    })
    .unwrap()
}

/// Serve one canned HTTP response per connection, forever.
async fn serve(response: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await;
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });
    format!("http://{}", addr)
}

#[yare::parameterized(
    root_listing = { None,               &[],      "https://ci.example.com/api/json?tree=jobs%5Bname%5D" },
    plain_job    = { Some("demo"),       &[],      "https://ci.example.com/job/demo/api/json?tree=jobs%5Bname%5D" },
    folder_job   = { Some("team/app"),   &[],      "https://ci.example.com/job/team/job/app/api/json?tree=jobs%5Bname%5D" },
    spaced_job   = { Some("my job"),     &["12"],  "https://ci.example.com/job/my%20job/12/api/json?tree=jobs%5Bname%5D" },
)]
fn api_url_layout(job: Option<&str>, extra: &[&str], expected: &str) {
    let jenkins = adapter("https://ci.example.com/", Duration::from_secs(1));
    assert_eq!(jenkins.api_url(job, extra, LIST_TREE).unwrap().as_str(), expected);
}

#[test]
fn api_url_keeps_base_path() {
    let jenkins = adapter("https://example.com/jenkins", Duration::from_secs(1));
    let url = jenkins.api_url(Some("demo"), &["3"], BUILD_TREE).unwrap();
    assert!(url.as_str().starts_with("https://example.com/jenkins/job/demo/3/api/json?tree="));
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = JenkinsAdapter::new(JenkinsConfig {
        url: "not a url".to_string(),
        user: None,
        token: None,
        request_timeout: Duration::from_secs(1),
    });
    assert!(matches!(result, Err(CiError::Request(_))));
}

#[test]
fn decodes_job_with_last_build() {
    let json = r#"{
        "_class": "hudson.model.FreeStyleProject",
        "description": "Deploys the API",
        "lastBuild": {"_class": "hudson.model.FreeStyleBuild", "number": 57}
    }"#;
    let job: JobJson = serde_json::from_str(json).unwrap();
    let info = job.into_info("team/api");
    assert_eq!(info.name, "team/api");
    assert_eq!(info.last_build_number, Some(57));
    assert_eq!(info.description.as_deref(), Some("Deploys the API"));
}

#[test]
fn decodes_never_built_job() {
    let job: JobJson = serde_json::from_str(r#"{"description": "", "lastBuild": null}"#).unwrap();
    let info = job.into_info("fresh");
    assert_eq!(info.last_build_number, None);
    assert_eq!(info.description, None);
}

#[test]
fn decodes_running_build() {
    let json = r##"{
        "result": null,
        "timestamp": 1710408413000,
        "displayName": "#6",
        "duration": 0,
        "url": "https://ci.example.com/job/demo/6/",
        "actions": [{}, null]
    }"##;
    let status: BuildStatus = serde_json::from_str::<BuildJson>(json).unwrap().into();
    assert!(!status.is_complete());
    assert_eq!(status.actions.len(), 2);
    assert_eq!(status.triggering_user(), None);
}

#[test]
fn decodes_finished_build_with_user_cause() {
    let json = r##"{
        "_class": "hudson.model.FreeStyleBuild",
        "result": "SUCCESS",
        "timestamp": 1710408413000,
        "displayName": "#6",
        "duration": 12500,
        "url": "https://ci.example.com/job/demo/6/",
        "actions": [
            {"_class": "hudson.model.ParametersAction"},
            {"_class": "hudson.model.CauseAction", "causes": [
                {"_class": "hudson.model.Cause$UserIdCause",
                 "shortDescription": "Started by user Alice",
                 "userId": "alice@example.com"}
            ]}
        ]
    }"##;
    let status: BuildStatus = serde_json::from_str::<BuildJson>(json).unwrap().into();
    assert_eq!(status.result, Some(BuildResult::Success));
    assert_eq!(status.duration_ms, 12_500);
    assert_eq!(status.display_name.as_deref(), Some("#6"));
    assert_eq!(status.triggering_user(), Some("alice@example.com"));
}

#[test]
fn decodes_job_listing() {
    let json = r#"{"jobs": [{"name": "api"}, {"name": "web_OLD"}]}"#;
    let list: JobListJson = serde_json::from_str(json).unwrap();
    let names: Vec<_> = list.jobs.into_iter().map(|j| j.name).collect();
    assert_eq!(names, vec!["api", "web_OLD"]);
}

#[tokio::test]
async fn unresponsive_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    // Accept and hold connections without answering
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    let jenkins = adapter(&format!("http://{}", addr), Duration::from_millis(100));
    let err = jenkins.get_job("demo").await.unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {err:?}");
}

#[tokio::test]
async fn missing_job_is_status_error() {
    let url = serve("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").await;
    let jenkins = adapter(&url, Duration::from_secs(5));
    let err = jenkins.get_job("ghost").await.unwrap_err();
    assert!(matches!(err, CiError::Status { status: 404, .. }), "got {err:?}");
    assert!(!err.is_timeout());
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let url = serve(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 9\r\nConnection: close\r\n\r\nnot json!",
    )
    .await;
    let jenkins = adapter(&url, Duration::from_secs(5));
    let err = jenkins.get_build("demo", 1).await.unwrap_err();
    assert!(matches!(err, CiError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn fetches_build_over_http() {
    let url = serve(concat!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 49\r\n",
        "Connection: close\r\n\r\n",
        r#"{"result":"FAILURE","duration":1000,"actions":[]}"#
    ))
    .await;
    let jenkins = adapter(&url, Duration::from_secs(5));
    let status = jenkins.get_build("demo", 2).await.unwrap();
    assert_eq!(status.result, Some(BuildResult::Failure));
    assert_eq!(status.duration_ms, 1000);
}
