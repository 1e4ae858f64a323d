// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run submission: build a request from the cached entities and post it.

use crate::error::DaemonError;
use dp_config::PoolConfig;
use dp_core::{PoolCache, TestRun};
use dp_farm::{Farm, FileAction, RunFile, RunParameter, RunRequest};

pub fn submit_run<F: Farm>(
    farm: &F,
    cache: &PoolCache,
    config: &PoolConfig,
    project_name: &str,
) -> Result<TestRun, DaemonError> {
    let entry = cache
        .project(project_name)
        .ok_or_else(|| DaemonError::UnknownProject(project_name.to_string()))?;
    let spec = config
        .project(project_name)
        .ok_or_else(|| DaemonError::UnknownProject(project_name.to_string()))?;
    let group = cache
        .device_group(&entry.device_group_name)
        .ok_or_else(|| DaemonError::UnknownDeviceGroup(entry.device_group_name.clone()))?;

    let mut files = Vec::new();
    if let Some(file) = &entry.test_file {
        files.push(RunFile { id: file.id, action: FileAction::RunTest });
    }
    if let Some(file) = &entry.application_file {
        files.push(RunFile { id: file.id, action: FileAction::Install });
    }

    let request = RunRequest {
        framework_id: entry.framework.id,
        os_type: spec.os_type,
        project_id: entry.project.id,
        scheduler: spec.scheduler.clone(),
        timeout: spec.timeout,
        device_group_id: group.id,
        files,
        test_run_parameters: entry
            .parameters
            .iter()
            .map(|(key, value)| RunParameter { key: key.clone(), value: value.clone() })
            .collect(),
    };

    Ok(farm.create_run(&request)?)
}

#[cfg(test)]
#[path = "submit_tests.rs"]
mod tests;
