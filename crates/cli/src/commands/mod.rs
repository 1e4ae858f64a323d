// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod dispatcher;
pub mod fetch;
pub mod report;

use std::path::Path;

pub(crate) const DEFAULT_CONFIG: &str = "config/config.yml";

pub(crate) fn config_path(config: Option<&Path>) -> &Path {
    config.unwrap_or_else(|| Path::new(DEFAULT_CONFIG))
}
