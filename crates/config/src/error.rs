// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration errors. All of these are fatal at startup.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("configuration has no '{0}' section")]
    MissingSection(&'static str),

    #[error("file name {name} is declared on more than one project path")]
    DuplicateFileName { name: String },

    #[error("declared file {0} does not exist on disk")]
    MissingFile(PathBuf),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
