// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn delete_device_group_removes_group_and_membership() {
    let farm = FakeFarm::new();
    farm.add_device(1, "pixel2-01", true);
    farm.add_group(40, "unit-p2-group", &[1]);

    farm.delete_device_group(40).unwrap();

    assert!(farm.device_groups_by_name("unit-p2-group").unwrap().is_empty());
    assert!(farm.device_group_devices(40).unwrap().is_empty());
    assert_eq!(farm.state().deleted_groups, vec![40]);
}

#[test]
fn deletions_count_as_mutations() {
    let farm = FakeFarm::new();
    farm.add_group(40, "unit-p2-group", &[]);
    assert_eq!(farm.state().mutation_count(), 0);

    farm.delete_device_group(40).unwrap();
    assert_eq!(farm.state().mutation_count(), 1);
}

#[test]
fn membership_mutations_update_counts_and_records() {
    let farm = FakeFarm::new();
    farm.add_device(1, "pixel2-01", true);
    farm.add_device(2, "pixel2-02", false);
    farm.add_group(40, "unit-p2-group", &[1]);

    let group = farm.add_devices_to_group(40, &[2]).unwrap();
    assert_eq!(group.device_count, 2);
    assert_eq!(farm.enabled_device_count(40).unwrap(), 1);

    farm.remove_device_from_group(40, 1).unwrap();
    assert_eq!(farm.device_group_devices(40).unwrap().len(), 1);

    let state = farm.state();
    assert_eq!(state.added, vec![(40, vec![2])]);
    assert_eq!(state.removed, vec![(40, 1)]);
}
