// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-project device and run counters.

use crate::entity::{RunState, TestRun};
use std::collections::BTreeSet;

/// Counters the dispatcher maintains for one project.
///
/// `count` is the declared device-group size, snapshotted at configuration
/// time. The remaining counters are refreshed by the active-runs reconciler
/// and the supervisor; `idle` is always derived, never set directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectStats {
    pub count: i64,
    pub idle: i64,
    pub offline: i64,
    pub disabled: i64,
    pub running: i64,
    pub waiting: i64,
    pub offline_devices: BTreeSet<String>,
}

impl ProjectStats {
    /// Zeroed stats for a group of `count` devices.
    pub fn new(count: i64) -> Self {
        Self { count, ..Self::default() }
    }

    /// Re-derive `idle = max(0, count - disabled - offline - running)`.
    pub fn recompute_idle(&mut self) {
        self.idle = (self.count - self.disabled - self.offline - self.running).max(0);
    }

    /// Replace `running`/`waiting` with a tally of `runs`, then re-derive
    /// `idle`. States other than WAITING and RUNNING are not counted.
    pub fn retally(&mut self, runs: &[TestRun]) {
        self.running = 0;
        self.waiting = 0;
        for run in runs {
            match run.state {
                RunState::Running => self.running += 1,
                RunState::Waiting => self.waiting += 1,
                _ => {}
            }
        }
        self.recompute_idle();
    }

    /// Replace the offline-device set, keeping `offline` equal to its size.
    pub fn set_offline_devices(&mut self, names: BTreeSet<String>) {
        self.offline = names.len() as i64;
        self.offline_devices = names;
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
