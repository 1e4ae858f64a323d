// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project reconciliation pass.

use super::Mode;
use crate::env;
use crate::error::DaemonError;
use dp_config::{PoolConfig, ProjectSpec};
use dp_core::{FileEntry, InputType, PoolCache, Project, ProjectEntry, ProjectState, ProjectStats};
use dp_farm::{Farm, ProjectUpdate};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::path::Path;

/// Parameter key the access token is injected under.
pub const ACCESS_TOKEN_PARAMETER: &str = "TASKCLUSTER_ACCESS_TOKEN";

pub(super) fn configure_projects<F: Farm>(
    farm: &F,
    config: &PoolConfig,
    cache: &mut PoolCache,
    files_dir: &Path,
    mode: Mode,
) -> Result<(), DaemonError> {
    let total = config.projects.len();
    for (counter, (project_name, spec)) in config.projects.iter().enumerate() {
        tracing::info!(
            project = %project_name,
            "configuring project ({}/{})",
            counter + 1,
            total
        );

        let mut matches = farm.projects_by_name(project_name)?;
        let mut project = match matches.len() {
            0 if mode.can_update() => farm.create_project(project_name, &spec.project_type)?,
            0 => return Err(DaemonError::ProjectMissing(project_name.clone())),
            1 => matches.remove(0),
            n => {
                return Err(DaemonError::DuplicateProject {
                    name: project_name.clone(),
                    count: n - 1,
                })
            }
        };

        let mut frameworks = farm.frameworks_by_name(&spec.framework_name)?;
        if frameworks.len() != 1 {
            return Err(DaemonError::FrameworkResolution {
                name: spec.framework_name.clone(),
                count: frameworks.len(),
            });
        }
        let framework = frameworks.remove(0);
        cache.frameworks.insert(framework.name.clone(), framework.clone());

        let test_file = resolve_file(
            farm,
            cache,
            &project,
            spec.test_file.as_deref(),
            InputType::Test,
            files_dir,
            mode,
        )?;
        let application_file = resolve_file(
            farm,
            cache,
            &project,
            spec.application_file.as_deref(),
            InputType::Application,
            files_dir,
            mode,
        )?;

        project = reconcile_properties(farm, project, project_name, spec, mode)?;

        let parameters = build_parameters(spec)?;

        let group = cache
            .device_groups
            .get(&spec.device_group_name)
            .ok_or_else(|| DaemonError::UnknownDeviceGroup(spec.device_group_name.clone()))?;

        cache.projects.insert(
            project_name.clone(),
            ProjectEntry {
                project,
                device_group_name: spec.device_group_name.clone(),
                framework,
                test_file,
                application_file,
                parameters,
                state: Mutex::new(ProjectState::new(ProjectStats::new(group.device_count))),
            },
        );
    }

    Ok(())
}

/// Resolve a declared file against the farm, uploading when allowed. The
/// files listing is ordered oldest first, so the last match is the current
/// upload.
fn resolve_file<F: Farm>(
    farm: &F,
    cache: &mut PoolCache,
    project: &Project,
    name: Option<&str>,
    input_type: InputType,
    files_dir: &Path,
    mode: Mode,
) -> Result<Option<FileEntry>, DaemonError> {
    let Some(name) = name else { return Ok(None) };

    let entry = match farm.files_by_name(name, input_type)?.pop() {
        Some(entry) => entry,
        None if mode.can_update() => {
            tracing::info!(file = %name, kind = %input_type, "uploading file");
            farm.upload_file(project.id, &files_dir.join(name), input_type)?;
            farm.files_by_name(name, input_type)?
                .pop()
                .ok_or_else(|| DaemonError::FileMissing(name.to_string()))?
        }
        None => return Err(DaemonError::FileMissing(name.to_string())),
    };

    cache.files.insert(entry.name.clone(), entry.clone());
    Ok(Some(entry))
}

/// Sync archiving and description when they differ from the declaration.
fn reconcile_properties<F: Farm>(
    farm: &F,
    project: Project,
    project_name: &str,
    spec: &ProjectSpec,
    mode: Mode,
) -> Result<Project, DaemonError> {
    let unchanged = project.archiving_strategy == spec.archiving_strategy
        && project.archiving_item_count == spec.archiving_item_count
        && project.description == spec.description;
    if unchanged {
        return Ok(project);
    }

    if !mode.can_update() {
        tracing::error!(
            project = %project_name,
            declared = %spec.archiving_strategy,
            farm = %project.archiving_strategy,
            "archivingStrategy differs"
        );
        tracing::error!(
            project = %project_name,
            declared = spec.archiving_item_count,
            farm = project.archiving_item_count,
            "archivingItemCount differs"
        );
        tracing::error!(
            project = %project_name,
            declared = ?spec.description,
            farm = ?project.description,
            "description differs"
        );
        return Err(DaemonError::ProjectDrift(project_name.to_string()));
    }

    Ok(farm.update_project(
        project.id,
        project_name,
        &ProjectUpdate {
            archiving_strategy: spec.archiving_strategy,
            archiving_item_count: spec.archiving_item_count,
            description: spec.description.clone(),
        },
    )?)
}

/// Final run parameters: the declared set, plus the access token resolved
/// from the environment for queue-driven projects.
fn build_parameters(spec: &ProjectSpec) -> Result<BTreeMap<String, String>, DaemonError> {
    let mut parameters = spec.additional_parameters.clone();
    if let Some(worker_type) = spec.worker_type() {
        let token = env::access_token_for(worker_type)?;
        parameters.insert(ACCESS_TOKEN_PARAMETER.to_string(), token);
    }
    Ok(parameters)
}
