// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory [`Farm`] implementation for tests.
//!
//! State is fully inspectable: tests seed it through the helpers or by
//! locking [`FakeFarm::state`] directly, and assert on the recorded
//! mutations afterwards.

use crate::api::Farm;
use crate::error::FarmError;
use crate::run::{ProjectUpdate, RunRequest};
use dp_core::{
    ArchivingStrategy, Device, DeviceGroup, FileEntry, Framework, InputType, OsType, Project,
    RunState, TestRun,
};
use parking_lot::{Mutex, MutexGuard};
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct FakeFarmState {
    pub devices: Vec<Device>,
    pub device_groups: Vec<DeviceGroup>,
    /// Group id to member device ids.
    pub group_members: HashMap<u64, Vec<u64>>,
    pub frameworks: Vec<Framework>,
    pub files: Vec<FileEntry>,
    pub projects: Vec<Project>,
    pub active: Vec<TestRun>,
    pub offline_devices: Vec<String>,
    /// Queued `create_run` failures, consumed before any success.
    pub run_errors: VecDeque<(u16, String)>,
    pub fail_active_runs: bool,

    // Recorded mutations.
    pub submitted: Vec<RunRequest>,
    pub uploads: Vec<(u64, PathBuf, InputType)>,
    pub added: Vec<(u64, Vec<u64>)>,
    pub removed: Vec<(u64, u64)>,
    pub created_groups: Vec<String>,
    pub created_projects: Vec<String>,
    pub updated_projects: Vec<u64>,
    pub deleted_groups: Vec<u64>,

    next_id: u64,
}

impl FakeFarmState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        1000 + self.next_id
    }

    /// Count of every recorded farm-side mutation, for read-only assertions.
    pub fn mutation_count(&self) -> usize {
        self.submitted.len()
            + self.uploads.len()
            + self.added.len()
            + self.removed.len()
            + self.created_groups.len()
            + self.created_projects.len()
            + self.updated_projects.len()
            + self.deleted_groups.len()
    }
}

#[derive(Debug, Default)]
pub struct FakeFarm {
    state: Mutex<FakeFarmState>,
}

impl FakeFarm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, FakeFarmState> {
        self.state.lock()
    }

    pub fn add_device(&self, id: u64, display_name: &str, enabled: bool) {
        self.state.lock().devices.push(Device {
            id,
            display_name: display_name.to_string(),
            model: None,
            online: true,
            enabled,
        });
    }

    /// Seed a group with the given members (device ids must already exist).
    pub fn add_group(&self, id: u64, display_name: &str, members: &[u64]) {
        let mut state = self.state.lock();
        state.device_groups.push(DeviceGroup {
            id,
            display_name: display_name.to_string(),
            device_count: members.len() as i64,
            os_type: OsType::Android,
        });
        state.group_members.insert(id, members.to_vec());
    }

    pub fn add_framework(&self, id: u64, name: &str) {
        self.state.lock().frameworks.push(Framework {
            id,
            name: name.to_string(),
            os_type: OsType::Android,
        });
    }

    pub fn add_file(&self, id: u64, name: &str, input_type: InputType) {
        self.state.lock().files.push(FileEntry {
            id,
            name: name.to_string(),
            input_type: Some(input_type),
        });
    }

    pub fn add_project(&self, id: u64, name: &str) {
        self.state.lock().projects.push(Project {
            id,
            name: name.to_string(),
            archiving_strategy: ArchivingStrategy::Never,
            archiving_item_count: 0,
            description: None,
            archive_time: None,
        });
    }

    pub fn queue_run_error(&self, status: u16, message: &str) {
        self.state.lock().run_errors.push_back((status, message.to_string()));
    }
}

impl Farm for FakeFarm {
    fn devices(&self) -> Result<Vec<Device>, FarmError> {
        Ok(self.state.lock().devices.clone())
    }

    fn offline_device_names(&self, device_model: Option<&str>) -> Result<Vec<String>, FarmError> {
        let state = self.state.lock();
        Ok(state
            .offline_devices
            .iter()
            .filter(|name| device_model.is_none_or(|model| name.starts_with(model)))
            .cloned()
            .collect())
    }

    fn device_groups_by_name(&self, display_name: &str) -> Result<Vec<DeviceGroup>, FarmError> {
        let state = self.state.lock();
        Ok(state
            .device_groups
            .iter()
            .filter(|g| g.display_name == display_name)
            .cloned()
            .collect())
    }

    fn create_device_group(
        &self,
        display_name: &str,
        os_type: OsType,
    ) -> Result<DeviceGroup, FarmError> {
        let mut state = self.state.lock();
        let id = state.next_id();
        let group =
            DeviceGroup { id, display_name: display_name.to_string(), device_count: 0, os_type };
        state.device_groups.push(group.clone());
        state.group_members.insert(id, Vec::new());
        state.created_groups.push(display_name.to_string());
        Ok(group)
    }

    fn delete_device_group(&self, group_id: u64) -> Result<(), FarmError> {
        let mut state = self.state.lock();
        state.device_groups.retain(|g| g.id != group_id);
        state.group_members.remove(&group_id);
        state.deleted_groups.push(group_id);
        Ok(())
    }

    fn device_group_devices(&self, group_id: u64) -> Result<Vec<Device>, FarmError> {
        let state = self.state.lock();
        let members = state.group_members.get(&group_id).cloned().unwrap_or_default();
        Ok(state.devices.iter().filter(|d| members.contains(&d.id)).cloned().collect())
    }

    fn enabled_device_count(&self, group_id: u64) -> Result<usize, FarmError> {
        Ok(self.device_group_devices(group_id)?.iter().filter(|d| d.enabled).count())
    }

    fn add_devices_to_group(
        &self,
        group_id: u64,
        device_ids: &[u64],
    ) -> Result<DeviceGroup, FarmError> {
        let mut state = self.state.lock();
        state.group_members.entry(group_id).or_default().extend_from_slice(device_ids);
        state.added.push((group_id, device_ids.to_vec()));
        let group = state
            .device_groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or_else(|| FarmError::Decode(format!("no group {group_id}")))?;
        group.device_count += device_ids.len() as i64;
        Ok(group.clone())
    }

    fn remove_device_from_group(&self, group_id: u64, device_id: u64) -> Result<(), FarmError> {
        let mut state = self.state.lock();
        if let Some(members) = state.group_members.get_mut(&group_id) {
            members.retain(|id| *id != device_id);
        }
        if let Some(group) = state.device_groups.iter_mut().find(|g| g.id == group_id) {
            group.device_count -= 1;
        }
        state.removed.push((group_id, device_id));
        Ok(())
    }

    fn frameworks_by_name(&self, name: &str) -> Result<Vec<Framework>, FarmError> {
        let state = self.state.lock();
        Ok(state.frameworks.iter().filter(|f| f.name == name).cloned().collect())
    }

    fn files_by_name(
        &self,
        name: &str,
        input_type: InputType,
    ) -> Result<Vec<FileEntry>, FarmError> {
        let state = self.state.lock();
        Ok(state
            .files
            .iter()
            .filter(|f| f.name == name && f.input_type == Some(input_type))
            .cloned()
            .collect())
    }

    fn upload_file(
        &self,
        project_id: u64,
        path: &Path,
        input_type: InputType,
    ) -> Result<(), FarmError> {
        let mut state = self.state.lock();
        let id = state.next_id();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        state.files.push(FileEntry { id, name, input_type: Some(input_type) });
        state.uploads.push((project_id, path.to_path_buf(), input_type));
        Ok(())
    }

    fn projects_by_name(&self, name: &str) -> Result<Vec<Project>, FarmError> {
        let state = self.state.lock();
        Ok(state
            .projects
            .iter()
            .filter(|p| p.name == name && p.archive_time.is_none())
            .cloned()
            .collect())
    }

    fn create_project(&self, name: &str, _project_type: &str) -> Result<Project, FarmError> {
        let mut state = self.state.lock();
        let id = state.next_id();
        let project = Project {
            id,
            name: name.to_string(),
            archiving_strategy: ArchivingStrategy::Never,
            archiving_item_count: 0,
            description: None,
            archive_time: None,
        };
        state.projects.push(project.clone());
        state.created_projects.push(name.to_string());
        Ok(project)
    }

    fn update_project(
        &self,
        project_id: u64,
        name: &str,
        update: &ProjectUpdate,
    ) -> Result<Project, FarmError> {
        let mut state = self.state.lock();
        state.updated_projects.push(project_id);
        let project = state
            .projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or_else(|| FarmError::Decode(format!("no project {project_id}")))?;
        project.name = name.to_string();
        project.archiving_strategy = update.archiving_strategy;
        project.archiving_item_count = update.archiving_item_count;
        project.description = update.description.clone();
        Ok(project.clone())
    }

    fn create_run(&self, request: &RunRequest) -> Result<TestRun, FarmError> {
        let mut state = self.state.lock();
        if let Some((status, message)) = state.run_errors.pop_front() {
            return Err(FarmError::Api { status, message });
        }
        let project_name = state
            .projects
            .iter()
            .find(|p| p.id == request.project_id)
            .map(|p| p.name.clone())
            .ok_or_else(|| FarmError::Decode(format!("no project {}", request.project_id)))?;
        let id = state.next_id();
        state.submitted.push(request.clone());
        Ok(TestRun { id, project_name, state: RunState::Waiting })
    }

    fn active_runs(&self) -> Result<Vec<TestRun>, FarmError> {
        let state = self.state.lock();
        if state.fail_active_runs {
            return Err(FarmError::Api { status: 500, message: "internal error".to_string() });
        }
        Ok(state.active.clone())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
