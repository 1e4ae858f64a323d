// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dp report` - offline device-group summary.
//!
//! Reads only the configuration file; never connects to the farm or the
//! running dispatcher.

use anyhow::{Context, Result};
use dp_config::DeviceGroupReport;
use std::path::Path;

pub fn report(config: Option<&Path>) -> Result<()> {
    let path = super::config_path(config);
    let config = dp_config::load(path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))?;
    println!("{}", DeviceGroupReport::from_config(&config));
    Ok(())
}
