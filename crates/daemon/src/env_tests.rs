// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
#[serial]
fn credentials_require_both_variables() {
    std::env::set_var(FARM_URL, "https://farm.example.net");
    std::env::remove_var(FARM_APIKEY);
    let err = farm_credentials().unwrap_err();
    match err {
        DaemonError::MissingEnv(name) => assert_eq!(name, FARM_APIKEY),
        other => panic!("unexpected error: {other}"),
    }

    std::env::set_var(FARM_APIKEY, "key");
    let (url, key) = farm_credentials().unwrap();
    assert_eq!(url, "https://farm.example.net");
    assert_eq!(key, "key");
}

#[test]
#[serial]
fn empty_values_count_as_missing() {
    std::env::set_var(FARM_URL, "");
    std::env::set_var(FARM_APIKEY, "key");
    assert!(matches!(farm_credentials(), Err(DaemonError::MissingEnv(_))));
    std::env::remove_var(FARM_URL);
}

#[test]
#[serial]
fn queue_root_defaults_and_overrides() {
    std::env::remove_var(QUEUE_ROOT);
    assert_eq!(queue_root(), DEFAULT_QUEUE_ROOT);
    std::env::set_var(QUEUE_ROOT, "https://queue.example.net/v1");
    assert_eq!(queue_root(), "https://queue.example.net/v1");
    std::env::remove_var(QUEUE_ROOT);
}

#[test]
#[serial]
fn worker_type_dashes_become_underscores() {
    std::env::set_var("gecko_t_bitbar_gw_perf_p2", "token");
    assert_eq!(access_token_for("gecko-t-bitbar-gw-perf-p2").unwrap(), "token");
    std::env::remove_var("gecko_t_bitbar_gw_perf_p2");

    let err = access_token_for("gecko-t-bitbar-gw-perf-p2").unwrap_err();
    match err {
        DaemonError::MissingEnv(name) => assert_eq!(name, "gecko_t_bitbar_gw_perf_p2"),
        other => panic!("unexpected error: {other}"),
    }
}
