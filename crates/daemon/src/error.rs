// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon errors.
//!
//! Everything here is fatal to the dispatcher: either a configuration
//! problem surfaced at startup, or the archived-files condition that makes
//! further dispatch pointless until the process restarts and reconfigures.
//! Transient farm and queue failures are handled (and logged) at their call
//! sites instead.

use dp_config::ConfigError;
use dp_farm::FarmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("environment variable {0} is not set")]
    MissingEnv(String),

    #[error("device group {name} has {count} duplicates on the farm")]
    DuplicateDeviceGroup { name: String, count: usize },

    #[error("device group {0} does not exist, but not creating as not configured to update")]
    GroupMissing(String),

    #[error(
        "device group {group} drifted from the declared membership \
         (remove {remove:?}, add {add:?}), but not configured to update"
    )]
    MembershipDrift { group: String, remove: Vec<String>, add: Vec<String> },

    #[error("device group {0} has a negative device count")]
    NegativeDeviceCount(String),

    #[error("project {name} has {count} duplicates on the farm")]
    DuplicateProject { name: String, count: usize },

    #[error("project {0} does not exist, but not creating as not configured to update")]
    ProjectMissing(String),

    #[error("project {0} differs from the declared configuration, but not configured to update")]
    ProjectDrift(String),

    #[error("framework {name} matched {count} entries, expected exactly one")]
    FrameworkResolution { name: String, count: usize },

    #[error("file {0} not found on the farm, but not uploading as not configured to update")]
    FileMissing(String),

    #[error("project {0} is not configured")]
    UnknownProject(String),

    #[error("device group {0} is not configured")]
    UnknownDeviceGroup(String),

    #[error("uploaded files were archived by the farm; restart to reconfigure")]
    ArchivedFiles,

    #[error(transparent)]
    Farm(#[from] FarmError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
