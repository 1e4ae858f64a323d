// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dp-daemon: the dispatch control loop.
//!
//! The configuration reconciler brings farm state into agreement with the
//! declarative configuration and populates the shared cache; the
//! [`TestRunManager`] then keeps the pool fed from the upstream queue until
//! a signal (or an unrecoverable archived-files error) stops it.

pub mod env;
pub mod error;
pub mod lifecycle;
pub mod manager;
pub mod reconcile;
pub mod submit;
pub mod upstream;

pub use error::DaemonError;
pub use lifecycle::Lifecycle;
pub use manager::{jobs_to_start, TestRunManager, DEFAULT_WAIT};
pub use reconcile::{configure, Mode};
pub use submit::submit_run;
#[cfg(any(test, feature = "test-support"))]
pub use upstream::FakeQueue;
pub use upstream::{TaskclusterQueue, UpstreamQueue, DEFAULT_QUEUE_ROOT};
