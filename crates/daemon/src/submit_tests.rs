// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::reconcile::test_helpers::*;
use crate::reconcile::{configure, Mode};
use dp_farm::{FakeFarm, FileAction};
use serial_test::serial;

#[test]
#[serial]
fn builds_request_from_cached_entities() {
    set_token();
    let farm = seeded_farm();
    let config = test_config();
    let files = files_dir();
    let cache = configure(&farm, &config, files.path(), Mode::Update).unwrap();

    let run = submit_run(&farm, &cache, &config, "unit-p2").unwrap();
    assert_eq!(run.project_name, "unit-p2");

    let state = farm.state();
    let request = &state.submitted[0];
    assert_eq!(request.framework_id, 12);
    assert_eq!(request.project_id, 250331);
    assert_eq!(request.device_group_id, 40);
    assert_eq!(request.scheduler, "SINGLE");
    assert_eq!(request.timeout, 0);

    // Test file runs, application file installs
    assert_eq!(request.files.len(), 2);
    assert_eq!(request.files[0].id, 7);
    assert_eq!(request.files[0].action, FileAction::RunTest);
    assert_eq!(request.files[1].id, 8);
    assert_eq!(request.files[1].action, FileAction::Install);

    // Parameters include the declared set and the injected token
    assert!(request
        .test_run_parameters
        .iter()
        .any(|p| p.key == "TASKCLUSTER_ACCESS_TOKEN" && p.value == "hunter2"));
    assert!(request.test_run_parameters.iter().any(|p| p.key == "TC_WORKER_TYPE"));
}

#[test]
#[serial]
fn unknown_project_is_an_error() {
    set_token();
    let farm = seeded_farm();
    let config = test_config();
    let files = files_dir();
    let cache = configure(&farm, &config, files.path(), Mode::Update).unwrap();

    let err = submit_run(&farm, &cache, &config, "nope").unwrap_err();
    assert!(matches!(err, DaemonError::UnknownProject(_)));
}

#[test]
#[serial]
fn farm_error_is_propagated() {
    set_token();
    let farm = seeded_farm();
    let config = test_config();
    let files = files_dir();
    let cache = configure(&farm, &config, files.path(), Mode::Update).unwrap();
    farm.queue_run_error(404, "FileEntity with id 7 does not exist");

    let err = submit_run(&farm, &cache, &config, "unit-p2").unwrap_err();
    match err {
        DaemonError::Farm(farm_err) => assert!(farm_err.is_archived_file()),
        other => panic!("unexpected error: {other}"),
    }
}
