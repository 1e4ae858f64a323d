// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use crate::error::DaemonError;
use crate::upstream::DEFAULT_QUEUE_ROOT;

/// Farm service URL. Required by every farm-touching command.
pub const FARM_URL: &str = "FARM_URL";

/// Farm API key. Required by every farm-touching command.
pub const FARM_APIKEY: &str = "FARM_APIKEY";

/// Optional override for the upstream queue root URL.
pub const QUEUE_ROOT: &str = "TASKCLUSTER_QUEUE_ROOT";

/// Farm URL and API key, both required.
pub fn farm_credentials() -> Result<(String, String), DaemonError> {
    Ok((require(FARM_URL)?, require(FARM_APIKEY)?))
}

pub fn queue_root() -> String {
    std::env::var(QUEUE_ROOT)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_QUEUE_ROOT.to_string())
}

/// The access token for a worker type lives in an env var named after the
/// worker type with `-` replaced by `_`. Absence is fatal: without it the
/// farm-side runs could never talk back to the upstream queue.
pub fn access_token_for(worker_type: &str) -> Result<String, DaemonError> {
    let name = worker_type.replace('-', "_");
    std::env::var(&name).map_err(|_| DaemonError::MissingEnv(name))
}

fn require(name: &'static str) -> Result<String, DaemonError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DaemonError::MissingEnv(name.to_string()))
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
