// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process lifecycle: RUNNING until a stop is requested, then every loop
//! exits at its next poll point. In-flight farm runs are never aborted, so
//! a restarted dispatcher picks them up from the active-runs listing.

use crate::error::DaemonError;
use signal_hook::consts::{SIGINT, SIGTERM, SIGUSR2};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

const POLL_SLICE: Duration = Duration::from_secs(1);

/// Shared stop flag. Cloning hands out another handle to the same state.
#[derive(Debug, Clone, Default)]
pub struct Lifecycle {
    stop: Arc<AtomicBool>,
    fault: Arc<AtomicBool>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        !self.stop.load(Ordering::SeqCst)
    }

    /// Graceful stop: loops exit at their next poll point, the process
    /// exits cleanly.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    /// Stop because dispatch cannot make progress. The process exits
    /// non-zero so its supervisor restarts it with reconfiguration.
    pub fn fail(&self) {
        self.fault.store(true, Ordering::SeqCst);
        self.stop.store(true, Ordering::SeqCst);
    }

    pub fn is_faulted(&self) -> bool {
        self.fault.load(Ordering::SeqCst)
    }

    /// SIGINT, SIGTERM and SIGUSR2 all request a graceful stop. The
    /// handler only sets the flag; loops observe it at their next poll.
    pub fn install_signal_handlers(&self) -> Result<(), DaemonError> {
        for signal in [SIGINT, SIGTERM, SIGUSR2] {
            signal_hook::flag::register(signal, Arc::clone(&self.stop))?;
        }
        Ok(())
    }

    /// Sleep up to `duration`, waking early once a stop is requested.
    pub fn sleep_while_running(&self, duration: Duration) {
        let deadline = Instant::now() + duration;
        while self.is_running() {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            std::thread::sleep((deadline - now).min(POLL_SLICE));
        }
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
