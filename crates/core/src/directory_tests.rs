// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn member(id: &str, email: Option<&str>) -> Member {
    Member { id: id.to_string(), name: format!("{id}-name"), email: email.map(str::to_string) }
}

#[test]
fn members_without_email_are_excluded() {
    let directory = Directory::from_members(vec![
        member("U1", Some("alice@example.com")),
        member("U2", None),
        member("U3", Some("carol@example.com")),
    ]);

    assert_eq!(directory.len(), 2);
    assert!(directory.lookup("alice@example.com").is_some());
    assert!(directory.lookup("carol@example.com").is_some());
}

#[test]
fn empty_email_is_not_contactable() {
    let directory = Directory::from_members(vec![member("U1", Some(""))]);
    assert!(directory.is_empty());
}

#[test]
fn lookup_resolves_handle() {
    let directory = Directory::from_members(vec![member("U1", Some("alice@example.com"))]);
    let entry = directory.lookup("alice@example.com").unwrap();
    assert_eq!(entry.handle, "U1");
    assert_eq!(entry.name, "U1-name");
    assert_eq!(entry.email, "alice@example.com");
}

#[test]
fn lookup_is_exact_match() {
    let directory = Directory::from_members(vec![member("U1", Some("alice@example.com"))]);
    assert!(directory.lookup("Alice@example.com").is_none());
    assert!(directory.lookup("alice").is_none());
}

#[test]
fn default_directory_is_empty() {
    let directory = Directory::default();
    assert!(directory.is_empty());
    assert!(directory.lookup("anyone@example.com").is_none());
}
