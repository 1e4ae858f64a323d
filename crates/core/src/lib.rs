// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dp-core: entities, statistics, and the shared state cache for the
//! device-pool dispatcher.

pub mod cache;
pub mod entity;
pub mod stats;

pub use cache::{PoolCache, ProjectEntry, ProjectState};
pub use entity::{
    ArchivingStrategy, Device, DeviceGroup, FileEntry, Framework, InputType, OsType, Project,
    RunState, TestRun,
};
pub use stats::ProjectStats;
