// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The steady-state dispatch loop.
//!
//! One queue-handler thread per queue-driven project decides how many runs
//! to start each tick; the active-runs thread replaces each project's view
//! of in-flight work; the supervisor stays on the calling thread, refreshes
//! device-level statistics and leaves the main thread free to take signals.
//!
//! Lock discipline: dispatch arithmetic and counter updates happen under
//! the project lock, HTTP never does. The `waiting` pre-increment after a
//! successful submission is what keeps a burst from over-dispatching before
//! the next active-runs reconciliation replaces the counters with tallied
//! truth.

use crate::error::DaemonError;
use crate::lifecycle::Lifecycle;
use crate::submit::submit_run;
use crate::upstream::UpstreamQueue;
use dp_config::PoolConfig;
use dp_core::{PoolCache, ProjectState, TestRun};
use dp_farm::Farm;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

/// Default pause between queue-handler ticks.
pub const DEFAULT_WAIT: Duration = Duration::from_secs(60);

const ACTIVE_RUNS_INTERVAL: Duration = Duration::from_secs(10);
const STATS_INTERVAL: Duration = Duration::from_secs(60);
/// Head start for the active-runs thread before handlers spawn.
const STARTUP_SETTLE: Duration = Duration::from_secs(2);

/// How many runs to start this tick.
///
/// Demand-capped by `pending`; capacity-capped by idle devices not already
/// spoken for, plus a small logarithmic over-provision that keeps the farm
/// fed while the backlog is deep. Clamped to zero.
pub fn jobs_to_start(pending: u64, idle: i64, waiting: i64) -> u64 {
    let overshoot = 1 + ((pending + 1) as f64).log10().floor() as i64;
    let capacity = (idle - waiting + overshoot).max(0);
    (pending as i64).min(capacity).max(0) as u64
}

pub struct TestRunManager<F, Q> {
    farm: Arc<F>,
    queue: Arc<Q>,
    cache: Arc<PoolCache>,
    config: Arc<PoolConfig>,
    lifecycle: Lifecycle,
    wait: Duration,
}

impl<F, Q> TestRunManager<F, Q>
where
    F: Farm + 'static,
    Q: UpstreamQueue + 'static,
{
    pub fn new(
        farm: Arc<F>,
        queue: Arc<Q>,
        cache: Arc<PoolCache>,
        config: Arc<PoolConfig>,
        lifecycle: Lifecycle,
        wait: Duration,
    ) -> Self {
        Self { farm, queue, cache, config, lifecycle, wait }
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Spawn the worker threads and run the supervisor until stop.
    pub fn run(self: Arc<Self>) -> Result<(), DaemonError> {
        let mut handles = Vec::new();

        let manager = Arc::clone(&self);
        handles.push(
            std::thread::Builder::new()
                .name("active_runs".to_string())
                .spawn(move || manager.active_runs_loop())?,
        );
        std::thread::sleep(STARTUP_SETTLE);

        for name in self.cache.project_names() {
            let queue_driven =
                self.config.project(name).is_some_and(|spec| spec.worker_type().is_some());
            if !queue_driven {
                // Only queue-driven projects get a handler; the rest are
                // submitted on demand.
                continue;
            }
            if let Err(err) = self.refresh_project_stats(name) {
                tracing::warn!(project = %name, error = %err, "failed to prepopulate statistics");
            }
            let manager = Arc::clone(&self);
            let project = name.to_string();
            handles.push(
                std::thread::Builder::new()
                    .name(project.clone())
                    .spawn(move || manager.queue_handler_loop(&project))?,
            );
        }

        self.supervisor_loop();

        for handle in handles {
            let _ = handle.join();
        }

        if self.lifecycle.is_faulted() {
            return Err(DaemonError::ArchivedFiles);
        }
        Ok(())
    }

    fn queue_handler_loop(&self, project_name: &str) {
        tracing::info!("queue handler starting");
        while self.lifecycle.is_running() {
            self.dispatch_tick(project_name);
            self.lifecycle.sleep_while_running(self.wait);
        }
        tracing::info!("queue handler exiting");
    }

    /// One scheduling pass for a project. Returns the number of runs
    /// submitted (used by tests; the loop ignores it).
    pub fn dispatch_tick(&self, project_name: &str) -> u64 {
        let Some(entry) = self.cache.project(project_name) else { return 0 };
        let Some(spec) = self.config.project(project_name) else { return 0 };
        let Some(worker_type) = spec.worker_type() else { return 0 };
        let Some(provisioner) = spec.taskcluster_provisioner_id.as_deref() else { return 0 };
        let group_name = spec.device_group_name.as_str();

        let (jobs, count) = {
            let state = entry.state.lock();
            let stats = &state.stats;
            if stats.offline > 0 || stats.disabled > 0 {
                let devices =
                    stats.offline_devices.iter().cloned().collect::<Vec<_>>().join(", ");
                tracing::warn!(
                    group = %group_name,
                    disabled = stats.disabled,
                    offline = stats.offline,
                    devices = %devices,
                    "devices unavailable"
                );
            }

            let pending = self.queue.pending(provisioner, worker_type);
            let jobs = jobs_to_start(pending, stats.idle, stats.waiting);
            if jobs > 0 {
                tracing::info!(group = %group_name, pending, jobs, "starting test runs");
            }
            (jobs, stats.count)
        };

        // Submissions happen outside the lock so a burst does not serialize
        // network I/O against the reconciler.
        let mut started = 0;
        for _ in 0..jobs {
            if !self.lifecycle.is_running() {
                break;
            }
            if count == 0 {
                // The farm rejects submissions against an empty group.
                tracing::warn!(group = %group_name, "device group is empty, not submitting");
                break;
            }
            match submit_run(self.farm.as_ref(), &self.cache, &self.config, project_name) {
                Ok(run) => {
                    tracing::info!(group = %group_name, run = run.id, "test run started");
                    // Seen by the next tick of any handler before the
                    // active-runs thread resyncs; bounds over-dispatch.
                    entry.state.lock().stats.waiting += 1;
                    started += 1;
                }
                Err(DaemonError::Farm(err)) if err.is_archived_file() => {
                    tracing::error!(
                        group = %group_name,
                        error = %err,
                        "uploaded files were archived by the farm, stopping for reconfiguration"
                    );
                    self.lifecycle.fail();
                    break;
                }
                Err(err) => {
                    tracing::error!(group = %group_name, error = %err, "failed to create test run");
                }
            }
        }
        started
    }

    fn active_runs_loop(&self) {
        while self.lifecycle.is_running() {
            tracing::debug!("getting active runs");
            if let Err(err) = self.refresh_active_runs() {
                // Never mutate the cache with partial data; retry next tick.
                tracing::warn!(error = %err, "failed to list active runs");
            }
            self.lifecycle.sleep_while_running(ACTIVE_RUNS_INTERVAL);
        }
        tracing::info!("active runs thread exiting");
    }

    /// Fetch the farm's active runs and replace every project's view.
    pub fn refresh_active_runs(&self) -> Result<(), DaemonError> {
        let runs = self.farm.active_runs()?;
        self.apply_active_runs(runs);
        Ok(())
    }

    /// Replace each project's active-run list with the given snapshot and
    /// retally its counters. Runs for unmanaged projects are discarded.
    pub fn apply_active_runs(&self, runs: Vec<TestRun>) {
        let mut accumulator: HashMap<&str, Vec<TestRun>> =
            self.cache.projects.keys().map(|name| (name.as_str(), Vec::new())).collect();
        for run in runs {
            let project_name = run.project_name.clone();
            if let Some(bucket) = accumulator.get_mut(project_name.as_str()) {
                bucket.push(run);
            }
        }

        for (name, entry) in &self.cache.projects {
            let runs = accumulator.remove(name.as_str()).unwrap_or_default();
            let mut state = entry.state.lock();
            state.active_runs = runs;
            let ProjectState { stats, active_runs } = &mut *state;
            stats.retally(active_runs);
        }
    }

    /// Refresh device-level statistics for one project: which declared
    /// devices are offline, and how many group members are enabled.
    pub fn refresh_project_stats(&self, project_name: &str) -> Result<(), DaemonError> {
        let entry = self
            .cache
            .project(project_name)
            .ok_or_else(|| DaemonError::UnknownProject(project_name.to_string()))?;
        let spec = self
            .config
            .project(project_name)
            .ok_or_else(|| DaemonError::UnknownProject(project_name.to_string()))?;
        let group = self
            .cache
            .device_group(&spec.device_group_name)
            .ok_or_else(|| DaemonError::UnknownDeviceGroup(spec.device_group_name.clone()))?;
        let declared = self.config.group_members(&spec.device_group_name);

        let offline: BTreeSet<String> = self
            .farm
            .offline_device_names(spec.device_model.as_deref())?
            .into_iter()
            .filter(|name| declared.is_some_and(|members| members.contains(name)))
            .collect();
        let enabled = self.farm.enabled_device_count(group.id)? as i64;

        let mut state = entry.state.lock();
        let stats = &mut state.stats;
        stats.set_offline_devices(offline);
        stats.disabled = (stats.count - enabled).max(0);
        stats.recompute_idle();
        if stats.running + stats.waiting > 0 {
            tracing::info!(
                group = %spec.device_group_name,
                count = stats.count,
                idle = stats.idle,
                offline = stats.offline,
                disabled = stats.disabled,
                running = stats.running,
                waiting = stats.waiting,
                "project statistics"
            );
        }
        Ok(())
    }

    /// Waiting and running totals across every managed project.
    pub fn totals(&self) -> (i64, i64) {
        let mut waiting = 0;
        let mut running = 0;
        for entry in self.cache.projects.values() {
            let state = entry.state.lock();
            waiting += state.stats.waiting;
            running += state.stats.running;
        }
        (waiting, running)
    }

    fn supervisor_loop(&self) {
        while self.lifecycle.is_running() {
            self.lifecycle.sleep_while_running(STATS_INTERVAL);
            if !self.lifecycle.is_running() {
                break;
            }
            tracing::debug!("getting stats for all projects");
            for name in self.cache.project_names() {
                if let Err(err) = self.refresh_project_stats(name) {
                    tracing::warn!(project = %name, error = %err, "failed to refresh statistics");
                }
            }
            let (waiting_total, running_total) = self.totals();
            tracing::info!(waiting_total, running_total, "dispatch totals");
        }
        tracing::info!("main thread exiting");
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
