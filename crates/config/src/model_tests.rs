// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

const CONFIG: &str = r#"
device_groups:
  unit-p2-group:
    pixel2-01: ~
    pixel2-02: ~
  perf-p2-group:
    pixel2-11: ~
  empty-group:
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
    description: managed by the dispatcher
    device_model: pixel2
    taskcluster_provisioner_id: proj-autophone
    additional_parameters:
      DOCKER_IMAGE_VERSION: '20191119T130125'
  unit-p2:
    device_group_name: unit-p2-group
    additional_parameters:
      TASKCLUSTER_CLIENT_ID: project/autophone/unit-p2
      TC_WORKER_TYPE: gecko-t-bitbar-gw-unit-p2
  docker-build:
    device_group_name: perf-p2-group
    test_file: docker-test.zip
"#;

#[test]
fn parses_and_merges_defaults() {
    let config = parse(CONFIG).unwrap();
    let unit = config.project("unit-p2").unwrap();
    assert_eq!(unit.device_group_name, "unit-p2-group");
    assert_eq!(unit.scheduler, "SINGLE");
    assert_eq!(unit.timeout, 0);
    assert_eq!(unit.test_file.as_deref(), Some("empty-test.zip"));
    assert_eq!(unit.application_file.as_deref(), Some("Bootstrap.apk"));
    assert_eq!(unit.taskcluster_provisioner_id.as_deref(), Some("proj-autophone"));
    // Nested parameters merge element-wise
    assert_eq!(
        unit.additional_parameters.get("DOCKER_IMAGE_VERSION").map(String::as_str),
        Some("20191119T130125")
    );
    assert_eq!(unit.worker_type(), Some("gecko-t-bitbar-gw-unit-p2"));
}

#[test]
fn defaults_entry_is_not_a_project() {
    let config = parse(CONFIG).unwrap();
    assert!(config.project("defaults").is_none());
    assert_eq!(config.projects.len(), 2);
}

#[test]
fn project_overrides_win() {
    let config = parse(CONFIG).unwrap();
    let docker = config.project("docker-build").unwrap();
    assert_eq!(docker.test_file.as_deref(), Some("docker-test.zip"));
    assert_eq!(docker.worker_type(), None);
}

#[test]
fn device_groups_are_name_sets() {
    let config = parse(CONFIG).unwrap();
    let members = config.group_members("unit-p2-group").unwrap();
    assert_eq!(members.len(), 2);
    assert!(members.contains("pixel2-01"));
    assert!(members.contains("pixel2-02"));
}

#[test]
fn null_group_body_is_empty() {
    let config = parse(CONFIG).unwrap();
    assert!(config.group_members("empty-group").unwrap().is_empty());
}

#[test]
fn missing_sections_fail() {
    assert!(matches!(
        parse("projects: {}"),
        Err(ConfigError::MissingSection("device_groups"))
    ));
    assert!(matches!(
        parse("device_groups: {}"),
        Err(ConfigError::MissingSection("projects"))
    ));
}

#[test]
fn incomplete_project_fails_typing() {
    // No defaults to supply the required keys
    let text = r#"
device_groups: {}
projects:
  lonely: {device_group_name: g1}
"#;
    assert!(parse(text).is_err());
}
