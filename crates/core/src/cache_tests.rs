// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::entity::{ArchivingStrategy, OsType, RunState, TestRun};

fn entry(name: &str, count: i64) -> ProjectEntry {
    ProjectEntry {
        project: Project {
            id: 1,
            name: name.to_string(),
            archiving_strategy: ArchivingStrategy::Never,
            archiving_item_count: 0,
            description: None,
            archive_time: None,
        },
        device_group_name: format!("{name}-group"),
        framework: Framework { id: 9, name: "usb".to_string(), os_type: OsType::Android },
        test_file: None,
        application_file: None,
        parameters: BTreeMap::new(),
        state: Mutex::new(ProjectState::new(ProjectStats::new(count))),
    }
}

#[test]
fn project_lookup() {
    let mut cache = PoolCache::default();
    cache.projects.insert("unit-p2".to_string(), entry("unit-p2", 5));
    assert!(cache.project("unit-p2").is_some());
    assert!(cache.project("other").is_none());
}

#[test]
fn project_names_sorted() {
    let mut cache = PoolCache::default();
    cache.projects.insert("perf-p2".to_string(), entry("perf-p2", 5));
    cache.projects.insert("batt-p2".to_string(), entry("batt-p2", 2));
    cache.projects.insert("unit-p2".to_string(), entry("unit-p2", 9));
    assert_eq!(cache.project_names(), vec!["batt-p2", "perf-p2", "unit-p2"]);
}

#[test]
fn state_guards_stats_and_runs_together() {
    let entry = entry("unit-p2", 3);
    {
        let mut state = entry.state.lock();
        state.active_runs.push(TestRun {
            id: 1,
            project_name: "unit-p2".to_string(),
            state: RunState::Waiting,
        });
        let ProjectState { stats, active_runs } = &mut *state;
        stats.retally(active_runs);
    }
    let state = entry.state.lock();
    assert_eq!(state.stats.waiting, 1);
    assert_eq!(state.stats.running + state.stats.waiting, state.active_runs.len() as i64);
}
