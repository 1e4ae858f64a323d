// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed configuration model and the loader pipeline.

use crate::error::ConfigError;
use crate::merge::apply_defaults;
use crate::validate;
use dp_core::{ArchivingStrategy, OsType};
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// The `projects` entry merged into every sibling.
pub const DEFAULTS_KEY: &str = "defaults";

/// Run parameter naming the upstream worker type. Projects without it are
/// not driven by the upstream queue.
pub const WORKER_TYPE_PARAMETER: &str = "TC_WORKER_TYPE";

/// One project's declared settings, after defaults application.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectSpec {
    pub device_group_name: String,
    #[serde(default)]
    pub device_model: Option<String>,
    pub framework_name: String,
    pub os_type: OsType,
    pub project_type: String,
    pub scheduler: String,
    pub timeout: u64,
    #[serde(default)]
    pub test_file: Option<String>,
    #[serde(default)]
    pub application_file: Option<String>,
    #[serde(default)]
    pub additional_parameters: BTreeMap<String, String>,
    #[serde(rename = "archivingStrategy")]
    pub archiving_strategy: ArchivingStrategy,
    #[serde(rename = "archivingItemCount")]
    pub archiving_item_count: u64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub taskcluster_provisioner_id: Option<String>,
}

impl ProjectSpec {
    /// The upstream worker type, when this project is queue-driven.
    pub fn worker_type(&self) -> Option<&str> {
        self.additional_parameters
            .get(WORKER_TYPE_PARAMETER)
            .map(String::as_str)
            .filter(|wt| !wt.is_empty())
    }
}

/// The whole configuration document, defaults already applied.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PoolConfig {
    #[serde(deserialize_with = "de_device_groups")]
    pub device_groups: BTreeMap<String, BTreeSet<String>>,
    pub projects: BTreeMap<String, ProjectSpec>,
}

impl PoolConfig {
    pub fn project(&self, name: &str) -> Option<&ProjectSpec> {
        self.projects.get(name)
    }

    /// Declared members of a device group.
    pub fn group_members(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.device_groups.get(name)
    }
}

/// Group declarations map device display names to `~`; only the key set
/// matters. A missing or null body declares an empty group.
fn de_device_groups<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, BTreeSet<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, Option<BTreeMap<String, Value>>> =
        Deserialize::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(group, members)| {
            (group, members.map(|m| m.into_keys().collect()).unwrap_or_default())
        })
        .collect())
}

/// Load and expand the configuration file.
pub fn load(path: &Path) -> Result<PoolConfig, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}

/// Parse a configuration document: validate file-name uniqueness on the
/// raw declarations, merge `defaults` into every project, then type.
pub fn parse(text: &str) -> Result<PoolConfig, ConfigError> {
    let raw: Value = serde_yaml::from_str(text)?;
    validate::unique_filenames(&raw)?;
    let expanded = expand(raw)?;
    Ok(serde_yaml::from_value(expanded)?)
}

/// Materialize the configuration: apply `defaults` to every project and
/// drop the `defaults` entry itself.
fn expand(mut root: Value) -> Result<Value, ConfigError> {
    let mapping = root
        .as_mapping_mut()
        .ok_or_else(|| ConfigError::Invalid("top level must be a mapping".to_string()))?;
    if !mapping.contains_key("device_groups") {
        return Err(ConfigError::MissingSection("device_groups"));
    }
    let projects = mapping
        .get_mut("projects")
        .ok_or(ConfigError::MissingSection("projects"))?
        .as_mapping_mut()
        .ok_or_else(|| ConfigError::Invalid("projects must be a mapping".to_string()))?;

    let defaults = projects
        .remove(DEFAULTS_KEY)
        .unwrap_or_else(|| Value::Mapping(serde_yaml::Mapping::new()));
    for (_, spec) in projects.iter_mut() {
        *spec = apply_defaults(spec, &defaults);
    }
    Ok(root)
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
