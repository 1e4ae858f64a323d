// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Device-group reconciliation pass.

use super::Mode;
use crate::error::DaemonError;
use dp_config::PoolConfig;
use dp_core::{OsType, PoolCache};
use dp_farm::Farm;
use std::collections::BTreeSet;

pub(super) fn configure_device_groups<F: Farm>(
    farm: &F,
    config: &PoolConfig,
    cache: &mut PoolCache,
    mode: Mode,
) -> Result<(), DaemonError> {
    // Snapshot all farm devices up front; adds resolve ids against this.
    for device in farm.devices()? {
        cache.devices.insert(device.display_name.clone(), device);
    }

    for (group_name, declared) in &config.device_groups {
        tracing::info!(group = %group_name, "configuring device group");

        let mut matches = farm.device_groups_by_name(group_name)?;
        let mut group = match matches.len() {
            0 if mode.can_update() => farm.create_device_group(group_name, OsType::Android)?,
            0 => return Err(DaemonError::GroupMissing(group_name.clone())),
            1 => matches.remove(0),
            n => {
                return Err(DaemonError::DuplicateDeviceGroup {
                    name: group_name.clone(),
                    count: n - 1,
                })
            }
        };

        let members = farm.device_group_devices(group.id)?;
        let member_names: BTreeSet<&str> =
            members.iter().map(|d| d.display_name.as_str()).collect();

        let to_remove: Vec<(String, u64)> = members
            .iter()
            .filter(|d| !declared.contains(&d.display_name))
            .map(|d| (d.display_name.clone(), d.id))
            .collect();
        // Declared devices the farm does not know yet are skipped; they are
        // assumed to be transiently unknown and picked up on a later run.
        let to_add: Vec<(String, u64)> = declared
            .iter()
            .filter(|name| !member_names.contains(name.as_str()))
            .filter_map(|name| cache.devices.get(name).map(|d| (name.clone(), d.id)))
            .collect();

        if !mode.can_update() && (!to_remove.is_empty() || !to_add.is_empty()) {
            return Err(DaemonError::MembershipDrift {
                group: group_name.clone(),
                remove: to_remove.into_iter().map(|(name, _)| name).collect(),
                add: to_add.into_iter().map(|(name, _)| name).collect(),
            });
        }

        for (name, device_id) in &to_remove {
            tracing::info!(group = %group_name, device = %name, "removing device from group");
            farm.remove_device_from_group(group.id, *device_id)?;
            group.device_count -= 1;
            if group.device_count < 0 {
                return Err(DaemonError::NegativeDeviceCount(group_name.clone()));
            }
        }

        if !to_add.is_empty() {
            let names: Vec<&str> = to_add.iter().map(|(name, _)| name.as_str()).collect();
            let ids: Vec<u64> = to_add.iter().map(|(_, id)| *id).collect();
            tracing::info!(group = %group_name, devices = ?names, "adding devices to group");
            group = farm.add_devices_to_group(group.id, &ids)?;
        }

        cache.device_groups.insert(group_name.clone(), group);
    }

    Ok(())
}
