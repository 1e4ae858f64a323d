// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File fixtures: the bootstrap APK download and the empty test zip.

use anyhow::Result;
use std::path::Path;
use std::time::Duration;

/// Canned APK the generic projects install as their application file.
pub const BOOTSTRAP_APK_URL: &str =
    "https://github.com/bitbar/bitbar-samples/blob/master/apps/builds/Testdroid.apk";

const DOWNLOAD_ATTEMPTS: u32 = 3;
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// A minimal valid ZIP archive: the empty end-of-central-directory record.
const EMPTY_ZIP: [u8; 22] = [
    0x50, 0x4b, 0x05, 0x06, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

pub fn download_bootstrap_apk(
    files_dir: &Path,
    filename: Option<&str>,
    force: bool,
) -> Result<()> {
    let name = filename.unwrap_or("Testdroid.apk");
    let dest = files_dir.join(name);
    if dest.exists() && !force {
        tracing::warn!(path = %dest.display(), "file exists, skipping download");
        return Ok(());
    }
    std::fs::create_dir_all(files_dir)?;
    // ?raw=true fetches the blob itself instead of the HTML page around it
    download_file(&format!("{BOOTSTRAP_APK_URL}?raw=true"), &dest, DOWNLOAD_ATTEMPTS)?;
    tracing::info!(path = %dest.display(), "downloaded bootstrap apk");
    Ok(())
}

pub fn empty_test_zip(files_dir: &Path, filename: &str) -> Result<()> {
    std::fs::create_dir_all(files_dir)?;
    let dest = files_dir.join(filename);
    std::fs::write(&dest, EMPTY_ZIP)?;
    tracing::info!(path = %dest.display(), "wrote empty test zip");
    Ok(())
}

fn download_file(url: &str, dest: &Path, max_attempts: u32) -> Result<()> {
    let client = reqwest::blocking::Client::builder().timeout(DOWNLOAD_TIMEOUT).build()?;
    for attempt in 1..=max_attempts {
        match try_download(&client, url, dest) {
            Ok(()) => return Ok(()),
            Err(err) if is_transient(&err) && attempt < max_attempts => {
                tracing::warn!(url, attempt, error = %err, "download failed, retrying");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

/// Connection and timeout failures are worth another attempt. An HTTP
/// status error is a permanent answer from the server; retrying cannot
/// change it.
fn is_transient(err: &anyhow::Error) -> bool {
    err.downcast_ref::<reqwest::Error>()
        .is_some_and(|err| err.is_connect() || err.is_timeout())
}

fn try_download(client: &reqwest::blocking::Client, url: &str, dest: &Path) -> Result<()> {
    let response = client.get(url).send()?.error_for_status()?;
    let bytes = response.bytes()?;
    std::fs::write(dest, &bytes)?;
    Ok(())
}

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod tests;
