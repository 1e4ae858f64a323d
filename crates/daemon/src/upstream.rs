// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Upstream task queue client.
//!
//! One operation: how many tasks are pending for a worker class. Failures
//! of any kind degrade to zero so the dispatch loop reads "unknown" as "no
//! demand" and never over-dispatches on stale information.

use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_QUEUE_ROOT: &str = "https://queue.taskcluster.net/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub trait UpstreamQueue: Send + Sync {
    /// Pending task count for `(provisioner_id, worker_type)`; 0 on any
    /// failure.
    fn pending(&self, provisioner_id: &str, worker_type: &str) -> u64;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PendingTasks {
    pending_tasks: u64,
}

pub struct TaskclusterQueue {
    http: reqwest::blocking::Client,
    root: String,
}

impl TaskclusterQueue {
    pub fn new(root: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http = reqwest::blocking::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, root: root.into().trim_end_matches('/').to_string() })
    }

    fn fetch(&self, provisioner_id: &str, worker_type: &str) -> Result<u64, reqwest::Error> {
        let url = format!("{}/pending/{provisioner_id}/{worker_type}", self.root);
        let response = self.http.get(url).send()?.error_for_status()?;
        Ok(response.json::<PendingTasks>()?.pending_tasks)
    }
}

impl UpstreamQueue for TaskclusterQueue {
    fn pending(&self, provisioner_id: &str, worker_type: &str) -> u64 {
        match self.fetch(provisioner_id, worker_type) {
            Ok(pending) => pending,
            Err(err) => {
                tracing::debug!(worker_type, error = %err, "pending lookup failed");
                0
            }
        }
    }
}

/// Programmable queue for tests.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct FakeQueue {
    pending: parking_lot::Mutex<std::collections::HashMap<String, u64>>,
}

#[cfg(any(test, feature = "test-support"))]
impl FakeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_pending(&self, worker_type: &str, count: u64) {
        self.pending.lock().insert(worker_type.to_string(), count);
    }
}

#[cfg(any(test, feature = "test-support"))]
impl UpstreamQueue for FakeQueue {
    fn pending(&self, _provisioner_id: &str, worker_type: &str) -> u64 {
        self.pending.lock().get(worker_type).copied().unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "upstream_tests.rs"]
mod tests;
