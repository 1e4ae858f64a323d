// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn archived_file_matches_farm_message() {
    let err = FarmError::Api {
        status: 404,
        message: "FileEntity with id 42 does not exist".to_string(),
    };
    assert!(err.is_archived_file());
}

#[test]
fn archived_file_match_is_case_insensitive() {
    let err = FarmError::Api {
        status: 404,
        message: "fileEntity with id 7 does not exist".to_string(),
    };
    assert!(err.is_archived_file());
}

#[yare::parameterized(
    wrong_status  = { 500, "FileEntity with id 42 does not exist" },
    other_missing = { 404, "ProjectEntity with id 42 does not exist" },
    plain_404     = { 404, "not found" },
)]
fn unrelated_errors_do_not_match(status: u16, message: &str) {
    let err = FarmError::Api { status, message: message.to_string() };
    assert!(!err.is_archived_file());
}
