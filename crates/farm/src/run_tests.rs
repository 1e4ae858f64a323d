// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use dp_core::OsType;

#[test]
fn run_request_wire_shape() {
    let request = RunRequest {
        framework_id: 12,
        os_type: OsType::Android,
        project_id: 250331,
        scheduler: "SINGLE".to_string(),
        timeout: 0,
        device_group_id: 40,
        files: vec![
            RunFile { id: 7, action: FileAction::RunTest },
            RunFile { id: 8, action: FileAction::Install },
        ],
        test_run_parameters: vec![RunParameter {
            key: "TC_WORKER_TYPE".to_string(),
            value: "gecko-t-bitbar-gw-unit-p2".to_string(),
        }],
    };
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["frameworkId"], 12);
    assert_eq!(value["osType"], "ANDROID");
    assert_eq!(value["projectId"], 250331);
    assert_eq!(value["deviceGroupId"], 40);
    assert_eq!(value["files"][0]["action"], "RUN_TEST");
    assert_eq!(value["files"][1]["action"], "INSTALL");
    assert_eq!(value["testRunParameters"][0]["key"], "TC_WORKER_TYPE");
}

#[test]
fn files_omitted_when_not_declared() {
    let request = RunRequest {
        framework_id: 1,
        os_type: OsType::Ios,
        project_id: 2,
        scheduler: "PARALLEL".to_string(),
        timeout: 600,
        device_group_id: 3,
        files: Vec::new(),
        test_run_parameters: Vec::new(),
    };
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["files"].as_array().map(Vec::len), Some(0));
    assert_eq!(value["testRunParameters"].as_array().map(Vec::len), Some(0));
}
