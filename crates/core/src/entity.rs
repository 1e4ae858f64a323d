// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Farm-side entities as the REST API serializes them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A physical device attached to the farm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: u64,
    pub display_name: String,
    /// Model prefix shared by devices of the same hardware (e.g. `pixel2`).
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub online: bool,
    #[serde(default)]
    pub enabled: bool,
}

/// A named set of devices a project runs against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceGroup {
    pub id: u64,
    pub display_name: String,
    /// Current membership size as reported by the farm. Kept signed so the
    /// reconciler can detect an underflow instead of wrapping.
    pub device_count: i64,
    pub os_type: OsType,
}

/// Execution environment (runner) on the farm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Framework {
    pub id: u64,
    pub name: String,
    pub os_type: OsType,
}

/// An uploaded test or application file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub input_type: Option<InputType>,
}

/// Farm-side container for test runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub archiving_strategy: ArchivingStrategy,
    pub archiving_item_count: u64,
    #[serde(default)]
    pub description: Option<String>,
    /// Set once the farm archives the project. Listings drop archived rows.
    #[serde(default)]
    pub archive_time: Option<i64>,
}

/// One submitted execution on the farm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRun {
    pub id: u64,
    pub project_name: String,
    pub state: RunState,
}

/// Lifecycle of a test run. The farm reports more states than the
/// dispatcher distinguishes; anything else folds into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunState {
    Waiting,
    Running,
    Finished,
    #[serde(other)]
    Other,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunState::Waiting => "WAITING",
            RunState::Running => "RUNNING",
            RunState::Finished => "FINISHED",
            RunState::Other => "OTHER",
        };
        write!(f, "{s}")
    }
}

/// Project archiving policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArchivingStrategy {
    Never,
    Days,
    Runs,
}

impl fmt::Display for ArchivingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArchivingStrategy::Never => "NEVER",
            ArchivingStrategy::Days => "DAYS",
            ArchivingStrategy::Runs => "RUNS",
        };
        write!(f, "{s}")
    }
}

/// Operating system family of a device group, framework, or run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OsType {
    Android,
    Ios,
    Undefined,
}

impl fmt::Display for OsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OsType::Android => "ANDROID",
            OsType::Ios => "IOS",
            OsType::Undefined => "UNDEFINED",
        };
        write!(f, "{s}")
    }
}

/// Role of an uploaded file in a run submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Test,
    Application,
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InputType::Test => "test",
            InputType::Application => "application",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
#[path = "entity_tests.rs"]
mod tests;
