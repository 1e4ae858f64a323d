// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration validators.

use crate::error::ConfigError;
use crate::model::PoolConfig;
use serde_yaml::Value;
use std::path::Path;

const FILE_KEYS: [&str; 2] = ["test_file", "application_file"];

/// Collect every file name declared across projects (including `defaults`,
/// before merging) and fail if any name appears on more than one path.
///
/// Uploaded files are looked up farm-side by name alone, so two projects
/// declaring the same name would silently share one upload.
pub fn unique_filenames(raw: &Value) -> Result<Vec<String>, ConfigError> {
    let mut names: Vec<String> = Vec::new();
    let Some(projects) = raw.get("projects").and_then(Value::as_mapping) else {
        return Ok(names);
    };
    for (_, spec) in projects {
        let Some(spec) = spec.as_mapping() else { continue };
        for key in FILE_KEYS {
            if let Some(Value::String(name)) = spec.get(key) {
                if names.iter().any(|seen| seen == name) {
                    return Err(ConfigError::DuplicateFileName { name: name.clone() });
                }
                names.push(name.clone());
            }
        }
    }
    Ok(names)
}

/// Verify that every declared file exists under `files_dir`. Run only when
/// the dispatcher may upload (update mode); read-only runs never touch the
/// local files.
pub fn preflight_files(config: &PoolConfig, files_dir: &Path) -> Result<(), ConfigError> {
    for spec in config.projects.values() {
        for name in spec.test_file.iter().chain(spec.application_file.iter()) {
            let path = files_dir.join(name);
            if !path.exists() {
                return Err(ConfigError::MissingFile(path));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
