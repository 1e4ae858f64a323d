// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Farm client errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FarmError {
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("farm returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl FarmError {
    /// A `404` whose message names a missing file entity. The farm archives
    /// old files server-side; once that happens every submission referencing
    /// the cached file id fails this way and only a reconfiguration (which
    /// re-uploads) can recover.
    pub fn is_archived_file(&self) -> bool {
        match self {
            FarmError::Api { status: 404, message } => {
                let message = message.to_ascii_lowercase();
                message.contains("fileentity with id") && message.contains("does not exist")
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
