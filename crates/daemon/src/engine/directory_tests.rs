// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use relay_adapters::FakeChatAdapter;
use relay_core::test_support::member;

fn refresher(chat: &FakeChatAdapter, handle: &DirectoryHandle) -> DirectoryRefresher<FakeChatAdapter> {
    DirectoryRefresher::new(chat.clone(), handle.clone(), Duration::from_secs(3600))
}

#[test]
fn new_handle_is_empty() {
    let handle = DirectoryHandle::new();
    assert!(handle.snapshot().is_empty());
    assert_eq!(handle.lookup("alice@example.com"), None);
}

#[test]
fn replace_swaps_the_whole_snapshot() {
    let handle = DirectoryHandle::new();
    handle.replace(Directory::from_members([member("U1", Some("alice@example.com"))]));
    let before = handle.snapshot();

    handle.replace(Directory::from_members([member("U2", Some("bob@example.com"))]));

    // Earlier snapshots stay intact for their holders
    assert!(before.lookup("alice@example.com").is_some());
    assert_eq!(handle.lookup("alice@example.com"), None);
    assert_eq!(handle.lookup("bob@example.com").map(|e| e.handle), Some("U2".to_string()));
}

#[tokio::test]
async fn refresh_skips_members_without_email() {
    let chat = FakeChatAdapter::new();
    chat.set_members(vec![
        member("U1", Some("alice@example.com")),
        member("U2", None),
        member("U3", Some("")),
    ]);
    let handle = DirectoryHandle::new();

    let users = refresher(&chat, &handle).refresh_once().await.unwrap();

    assert_eq!(users, 1);
    assert_eq!(handle.snapshot().len(), 1);
    assert_eq!(handle.lookup("alice@example.com").map(|e| e.handle), Some("U1".to_string()));
}

#[tokio::test]
async fn failed_refresh_keeps_the_previous_snapshot() {
    let chat = FakeChatAdapter::new();
    chat.set_members(vec![member("U1", Some("alice@example.com"))]);
    let handle = DirectoryHandle::new();
    let refresher = refresher(&chat, &handle);
    refresher.refresh_once().await.unwrap();

    chat.set_members(vec![]);
    chat.fail_next_list(ChatError::Api("ratelimited".to_string()));
    assert!(refresher.refresh_once().await.is_err());

    assert!(handle.lookup("alice@example.com").is_some());
}

#[tokio::test(start_paused = true)]
async fn spawned_refresher_runs_now_and_every_interval() {
    let chat = FakeChatAdapter::new();
    chat.set_members(vec![member("U1", Some("alice@example.com"))]);
    let handle = DirectoryHandle::new();
    let task = refresher(&chat, &handle).spawn();

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(chat.member_lists(), 1);
    assert!(handle.lookup("alice@example.com").is_some());

    chat.set_members(vec![member("U2", Some("bob@example.com"))]);
    chat.fail_next_list(ChatError::Request("connection reset".to_string()));
    tokio::time::sleep(Duration::from_secs(3600)).await;
    assert_eq!(chat.member_lists(), 2);
    assert!(handle.lookup("alice@example.com").is_some());

    tokio::time::sleep(Duration::from_secs(3600)).await;
    assert_eq!(chat.member_lists(), 3);
    assert_eq!(handle.lookup("alice@example.com"), None);
    assert!(handle.lookup("bob@example.com").is_some());

    task.abort();
}
