// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn empty_zip_is_a_bare_end_of_central_directory() {
    assert_eq!(EMPTY_ZIP.len(), 22);
    assert_eq!(&EMPTY_ZIP[..4], b"PK\x05\x06");
    assert!(EMPTY_ZIP[4..].iter().all(|b| *b == 0));
}

#[test]
fn empty_test_zip_writes_the_record() {
    let dir = tempfile::tempdir().unwrap();
    empty_test_zip(dir.path(), "empty-test.zip").unwrap();
    let written = std::fs::read(dir.path().join("empty-test.zip")).unwrap();
    assert_eq!(written, EMPTY_ZIP);
}

#[test]
fn empty_test_zip_creates_the_files_dir() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("files");
    empty_test_zip(&nested, "empty-test.zip").unwrap();
    assert!(nested.join("empty-test.zip").exists());
}
