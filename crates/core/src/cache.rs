// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory view of the farm entities the dispatcher manages.
//!
//! The cache is populated once by the configuration reconciler and then
//! shared read-only between threads. The only mutable pieces are the
//! per-project [`ProjectState`] values, each behind its own lock so that
//! projects never contend with each other.

use crate::entity::{Device, DeviceGroup, FileEntry, Framework, Project, TestRun};
use crate::stats::ProjectStats;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};

/// State guarded by a project's lock: its statistics and the last observed
/// list of in-flight runs. Keeping both behind one mutex means a stats
/// update and an active-runs replacement can never interleave.
#[derive(Debug, Default)]
pub struct ProjectState {
    pub stats: ProjectStats,
    pub active_runs: Vec<TestRun>,
}

impl ProjectState {
    pub fn new(stats: ProjectStats) -> Self {
        Self { stats, active_runs: Vec::new() }
    }
}

/// A managed project with everything a run submission needs resolved.
#[derive(Debug)]
pub struct ProjectEntry {
    pub project: Project,
    pub device_group_name: String,
    pub framework: Framework,
    pub test_file: Option<FileEntry>,
    pub application_file: Option<FileEntry>,
    /// Final run parameters, including any token injected at configure time.
    pub parameters: BTreeMap<String, String>,
    pub state: Mutex<ProjectState>,
}

/// Process-wide cache of observed farm state.
#[derive(Debug, Default)]
pub struct PoolCache {
    /// All farm devices, keyed by display name.
    pub devices: HashMap<String, Device>,
    /// Declared device groups, keyed by display name.
    pub device_groups: HashMap<String, DeviceGroup>,
    /// Frameworks resolved for configured projects, keyed by name.
    pub frameworks: HashMap<String, Framework>,
    /// Files resolved for configured projects, keyed by name.
    pub files: HashMap<String, FileEntry>,
    /// Managed projects, keyed by name.
    pub projects: HashMap<String, ProjectEntry>,
}

impl PoolCache {
    pub fn project(&self, name: &str) -> Option<&ProjectEntry> {
        self.projects.get(name)
    }

    pub fn device_group(&self, name: &str) -> Option<&DeviceGroup> {
        self.device_groups.get(name)
    }

    /// Project names in a stable order, for deterministic iteration and logs.
    pub fn project_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.projects.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
