// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;

fn numbers(builds: &[BuildRef]) -> Vec<u64> {
    builds.iter().map(|b| b.number).collect()
}

#[test]
fn observe_spawns_every_missed_build() {
    let mut job = MonitoredJob::new("demo", 5);
    let builds = job.observe(7);

    assert_eq!(numbers(&builds), vec![6, 7]);
    assert!(builds.iter().all(|b| b.job_name == "demo"));
    assert_eq!(job.last_seen(), 7);
}

#[yare::parameterized(
    unchanged = { 5, 5 },
    stale     = { 5, 3 },
    zero      = { 5, 0 },
)]
fn observe_ignores_non_increasing(start: u64, latest: u64) {
    let mut job = MonitoredJob::new("demo", start);
    assert!(job.observe(latest).is_empty());
    assert_eq!(job.last_seen(), start);
}

#[test]
fn from_info_seeds_last_seen() {
    let job = MonitoredJob::from_info(JobInfo {
        name: "api".to_string(),
        last_build_number: Some(42),
        description: Some("API deploy".to_string()),
    });
    assert_eq!(job.name, "api");
    assert_eq!(job.last_seen(), 42);
    assert_eq!(job.description.as_deref(), Some("API deploy"));
}

#[test]
fn never_built_job_watches_first_build() {
    let mut job = MonitoredJob::from_info(JobInfo {
        name: "fresh".to_string(),
        last_build_number: None,
        description: None,
    });
    assert_eq!(job.last_seen(), 0);
    assert_eq!(numbers(&job.observe(1)), vec![1]);
}

proptest! {
    #[test]
    fn observe_sequence_is_monotonic_and_gapless(
        start in 0u64..1_000,
        polls in proptest::collection::vec(0u64..1_200, 0..40),
    ) {
        let mut job = MonitoredJob::new("prop", start);
        let mut spawned = Vec::new();

        for latest in polls {
            let before = job.last_seen();
            let builds = job.observe(latest);
            let after = job.last_seen();

            prop_assert!(after >= before);
            prop_assert_eq!(builds.len() as u64, after - before);
            prop_assert_eq!(numbers(&builds), (before + 1..=after).collect::<Vec<_>>());
            spawned.extend(numbers(&builds));
        }

        // Across all cycles: no duplicates, no gaps
        let expected: Vec<u64> = (start + 1..=job.last_seen()).collect();
        prop_assert_eq!(spawned, expected);
    }
}
