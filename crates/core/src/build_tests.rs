// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn cause(user_id: Option<&str>) -> BuildCause {
    BuildCause { user_id: user_id.map(str::to_string) }
}

fn action(causes: Vec<BuildCause>) -> BuildAction {
    BuildAction { causes }
}

#[test]
fn build_ref_display() {
    assert_eq!(BuildRef::new("demo", 6).to_string(), "demo#6");
}

#[test]
fn running_build_is_not_complete() {
    let status = BuildStatus::default();
    assert!(!status.is_complete());

    let done = BuildStatus { result: Some(BuildResult::Success), ..Default::default() };
    assert!(done.is_complete());
}

#[test]
fn triggering_user_skips_actions_without_causes() {
    let status = BuildStatus {
        actions: vec![
            action(vec![]),
            action(vec![cause(None)]),
            action(vec![cause(Some("alice@example.com"))]),
            action(vec![cause(Some("bob@example.com"))]),
        ],
        ..Default::default()
    };
    assert_eq!(status.triggering_user(), Some("alice@example.com"));
}

#[test]
fn triggering_user_only_inspects_leading_cause() {
    let status = BuildStatus {
        actions: vec![action(vec![cause(None), cause(Some("hidden@example.com"))])],
        ..Default::default()
    };
    assert_eq!(status.triggering_user(), None);
}

#[test]
fn empty_user_id_is_ignored() {
    let status = BuildStatus {
        actions: vec![action(vec![cause(Some(""))]), action(vec![cause(Some("carol"))])],
        ..Default::default()
    };
    assert_eq!(status.triggering_user(), Some("carol"));
}

#[test]
fn timer_triggered_build_has_no_user() {
    let status = BuildStatus {
        actions: vec![action(vec![cause(None)])],
        ..Default::default()
    };
    assert_eq!(status.triggering_user(), None);
}
