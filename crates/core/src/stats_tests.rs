// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::entity::{RunState, TestRun};

fn run(id: u64, state: RunState) -> TestRun {
    TestRun { id, project_name: "unit-p2".to_string(), state }
}

#[test]
fn idle_is_capacity_minus_unavailable() {
    let mut stats = ProjectStats::new(10);
    stats.disabled = 2;
    stats.offline = 1;
    stats.running = 3;
    stats.recompute_idle();
    assert_eq!(stats.idle, 4);
}

#[test]
fn idle_clamps_at_zero() {
    let mut stats = ProjectStats::new(2);
    stats.offline = 1;
    stats.running = 4;
    stats.recompute_idle();
    assert_eq!(stats.idle, 0);
}

#[test]
fn retally_counts_waiting_and_running_only() {
    let mut stats = ProjectStats::new(8);
    let runs = vec![
        run(1, RunState::Running),
        run(2, RunState::Running),
        run(3, RunState::Waiting),
        run(4, RunState::Finished),
        run(5, RunState::Other),
    ];
    stats.retally(&runs);
    assert_eq!(stats.running, 2);
    assert_eq!(stats.waiting, 1);
    assert_eq!(stats.running + stats.waiting, 3);
    assert_eq!(stats.idle, 6);
}

#[test]
fn retally_replaces_stale_counters() {
    let mut stats = ProjectStats::new(4);
    stats.running = 9;
    stats.waiting = 9;
    stats.retally(&[]);
    assert_eq!(stats.running, 0);
    assert_eq!(stats.waiting, 0);
    assert_eq!(stats.idle, 4);
}

#[test]
fn offline_tracks_set_size() {
    let mut stats = ProjectStats::new(6);
    let names: std::collections::BTreeSet<String> =
        ["pixel2-03".to_string(), "pixel2-11".to_string()].into();
    stats.set_offline_devices(names);
    assert_eq!(stats.offline, 2);
    assert_eq!(stats.offline as usize, stats.offline_devices.len());
    stats.recompute_idle();
    assert_eq!(stats.idle, 4);
}
