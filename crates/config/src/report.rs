// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Offline device-group report.
//!
//! Reads only the configuration file; never the live dispatcher state.
//! Builder groups are excluded from the group buckets, and devices are
//! summarized by model prefix (the display-name segment before the
//! trailing index, so `pixel2-27` counts toward `pixel2`).

use crate::model::PoolConfig;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Default, PartialEq)]
pub struct DeviceGroupReport {
    /// Groups whose name marks them as test pools.
    pub test_groups: BTreeMap<String, usize>,
    /// Every other non-builder group.
    pub worker_groups: BTreeMap<String, usize>,
    /// Device counts by model prefix, across all groups.
    pub models: BTreeMap<String, usize>,
}

impl DeviceGroupReport {
    pub fn from_config(config: &PoolConfig) -> Self {
        let mut report = Self::default();
        for (group, members) in &config.device_groups {
            if !group.contains("-builder") {
                let bucket = if group.contains("test") {
                    &mut report.test_groups
                } else {
                    &mut report.worker_groups
                };
                bucket.insert(group.clone(), members.len());
            }
            for device in members {
                *report.models.entry(model_prefix(device).to_string()).or_default() += 1;
            }
        }
        report
    }

    pub fn total_devices(&self) -> usize {
        self.models.values().sum()
    }
}

impl fmt::Display for DeviceGroupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "/// worker groups ///")?;
        for (group, count) in &self.worker_groups {
            writeln!(f, "{group}: {count}")?;
        }
        writeln!(f, "/// test groups ///")?;
        for (group, count) in &self.test_groups {
            writeln!(f, "{group}: {count}")?;
        }
        writeln!(f, "/// device summary ///")?;
        for (model, count) in &self.models {
            writeln!(f, "{model}: {count}")?;
        }
        write!(f, "total: {}", self.total_devices())
    }
}

/// `pixel2-27` → `pixel2`; names without a numeric index count as-is.
fn model_prefix(device_name: &str) -> &str {
    match device_name.rsplit_once('-') {
        Some((prefix, index)) if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) => {
            prefix
        }
        _ => device_name,
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
