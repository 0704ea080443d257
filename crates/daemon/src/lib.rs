// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sj-daemon: render worker pool, submission façade, and daemon lifecycle.

pub mod config;
pub mod env;
pub mod facade;
pub mod lifecycle;
pub mod logging;
pub mod worker;

pub use config::{Config, ConfigError};
pub use facade::{LookupError, SubmitError, Submitter};
pub use lifecycle::{shutdown_signal, startup, startup_with, Daemon, LifecycleError};
pub use worker::{Scoreboard, Slot, WorkerPool, WorkerPoolHandle};
