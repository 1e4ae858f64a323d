// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The farm operations the dispatcher consumes.
//!
//! Implemented over REST by [`crate::FarmClient`] and in-memory by
//! [`crate::FakeFarm`]. Methods block; the dispatcher runs on plain OS
//! threads and tolerates blocking I/O at every call site.

use crate::error::FarmError;
use crate::run::{ProjectUpdate, RunRequest};
use dp_core::{Device, DeviceGroup, FileEntry, Framework, InputType, OsType, Project, TestRun};
use std::path::Path;

pub trait Farm: Send + Sync {
    /// All devices known to the farm.
    fn devices(&self) -> Result<Vec<Device>, FarmError>;

    /// Display names of devices the farm reports as offline, optionally
    /// restricted to names starting with `device_model`.
    fn offline_device_names(&self, device_model: Option<&str>) -> Result<Vec<String>, FarmError>;

    /// Device groups whose display name equals `display_name`.
    fn device_groups_by_name(&self, display_name: &str) -> Result<Vec<DeviceGroup>, FarmError>;

    fn create_device_group(
        &self,
        display_name: &str,
        os_type: OsType,
    ) -> Result<DeviceGroup, FarmError>;

    fn delete_device_group(&self, group_id: u64) -> Result<(), FarmError>;

    /// Current membership of a group.
    fn device_group_devices(&self, group_id: u64) -> Result<Vec<Device>, FarmError>;

    /// Number of enabled devices currently in a group.
    fn enabled_device_count(&self, group_id: u64) -> Result<usize, FarmError>;

    /// Bulk-add devices; returns the updated group.
    fn add_devices_to_group(
        &self,
        group_id: u64,
        device_ids: &[u64],
    ) -> Result<DeviceGroup, FarmError>;

    fn remove_device_from_group(&self, group_id: u64, device_id: u64) -> Result<(), FarmError>;

    /// Frameworks whose name equals `name`.
    fn frameworks_by_name(&self, name: &str) -> Result<Vec<Framework>, FarmError>;

    /// Files of `input_type` named `name`, oldest first.
    fn files_by_name(&self, name: &str, input_type: InputType)
        -> Result<Vec<FileEntry>, FarmError>;

    fn upload_file(
        &self,
        project_id: u64,
        path: &Path,
        input_type: InputType,
    ) -> Result<(), FarmError>;

    /// Unarchived projects whose name equals `name`.
    fn projects_by_name(&self, name: &str) -> Result<Vec<Project>, FarmError>;

    fn create_project(&self, name: &str, project_type: &str) -> Result<Project, FarmError>;

    fn update_project(
        &self,
        project_id: u64,
        name: &str,
        update: &ProjectUpdate,
    ) -> Result<Project, FarmError>;

    /// Submit a run; the response carries at least the created run's id.
    fn create_run(&self, request: &RunRequest) -> Result<TestRun, FarmError>;

    /// All runs with no end time, across every project visible to the key.
    fn active_runs(&self) -> Result<Vec<TestRun>, FarmError>;
}
