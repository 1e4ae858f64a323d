// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request payloads for run submission and project updates.

use dp_core::{ArchivingStrategy, OsType};
use serde::{Deserialize, Serialize};

/// What the farm should do with a referenced file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileAction {
    RunTest,
    Install,
}

/// One file reference in a run submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunFile {
    pub id: u64,
    pub action: FileAction,
}

/// One `key=value` parameter passed through to the run environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunParameter {
    pub key: String,
    pub value: String,
}

/// A test-run submission, serialized as the `runs` endpoint expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
    pub framework_id: u64,
    pub os_type: OsType,
    pub project_id: u64,
    pub scheduler: String,
    pub timeout: u64,
    pub device_group_id: u64,
    pub files: Vec<RunFile>,
    pub test_run_parameters: Vec<RunParameter>,
}

/// Mutable project properties the reconciler keeps in agreement with the
/// declarative configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectUpdate {
    pub archiving_strategy: ArchivingStrategy,
    pub archiving_item_count: u64,
    pub description: Option<String>,
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
