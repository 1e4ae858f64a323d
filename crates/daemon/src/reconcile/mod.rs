// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration reconciliation: bring farm state into agreement with the
//! declarative configuration, populating the shared cache along the way.
//!
//! Two passes, in order: device groups first (the project pass reads group
//! sizes), then projects. In read-only mode any required farm-side change
//! is fatal instead of applied.

mod device_groups;
mod projects;

use crate::error::DaemonError;
use dp_config::{validate, PoolConfig};
use dp_core::PoolCache;
use dp_farm::Farm;
use std::path::Path;
use std::time::Instant;

/// Whether the reconciler may create or modify farm entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Update,
    ReadOnly,
}

impl Mode {
    pub fn can_update(self) -> bool {
        matches!(self, Mode::Update)
    }
}

/// Run both reconciliation passes and return the populated cache.
pub fn configure<F: Farm>(
    farm: &F,
    config: &PoolConfig,
    files_dir: &Path,
    mode: Mode,
) -> Result<PoolCache, DaemonError> {
    if mode.can_update() {
        // Only update mode uploads, so only update mode needs the files.
        tracing::info!("configure: performing checks");
        validate::preflight_files(config, files_dir)?;
    }

    tracing::info!("configure: starting configuration");
    let start = Instant::now();
    let mut cache = PoolCache::default();
    device_groups::configure_device_groups(farm, config, &mut cache, mode)?;
    projects::configure_projects(farm, config, &mut cache, files_dir, mode)?;
    tracing::info!(elapsed_secs = start.elapsed().as_secs(), "configure: configuration complete");
    Ok(cache)
}

#[cfg(test)]
pub(crate) mod test_helpers;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
