// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for reconciler and manager tests.

use dp_config::PoolConfig;
use dp_core::InputType;
use dp_farm::FakeFarm;

pub(crate) const WORKER_TYPE: &str = "gecko-t-bitbar-gw-unit-p2";
/// Env var the access token is read from (worker type, dashes replaced).
pub(crate) const TOKEN_VAR: &str = "gecko_t_bitbar_gw_unit_p2";

pub(crate) const CONFIG: &str = r#"
device_groups:
  unit-p2-group:
    pixel2-01: ~
    pixel2-02: ~
projects:
  defaults:
    application_file: Bootstrap.apk
    test_file: empty-test.zip
    framework_name: mozilla-usb
    os_type: ANDROID
    project_type: GENERIC
    scheduler: SINGLE
    timeout: 0
    archivingStrategy: NEVER
    archivingItemCount: 0
    device_model: pixel2
    taskcluster_provisioner_id: proj-autophone
  unit-p2:
    device_group_name: unit-p2-group
    additional_parameters:
      TC_WORKER_TYPE: gecko-t-bitbar-gw-unit-p2
"#;

pub(crate) fn test_config() -> PoolConfig {
    dp_config::parse(CONFIG).unwrap()
}

/// A farm that already agrees with [`CONFIG`].
pub(crate) fn seeded_farm() -> FakeFarm {
    let farm = FakeFarm::new();
    farm.add_device(1, "pixel2-01", true);
    farm.add_device(2, "pixel2-02", true);
    farm.add_group(40, "unit-p2-group", &[1, 2]);
    farm.add_framework(12, "mozilla-usb");
    farm.add_project(250331, "unit-p2");
    farm.add_file(7, "empty-test.zip", InputType::Test);
    farm.add_file(8, "Bootstrap.apk", InputType::Application);
    farm
}

/// Files directory containing everything [`CONFIG`] declares.
pub(crate) fn files_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("empty-test.zip"), b"zip").unwrap();
    std::fs::write(dir.path().join("Bootstrap.apk"), b"apk").unwrap();
    dir
}

pub(crate) fn set_token() {
    std::env::set_var(TOKEN_VAR, "hunter2");
}
