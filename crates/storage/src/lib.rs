// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sj-storage: filesystem-backed job queue and result pool.
//!
//! Neither store keeps metadata beyond the files themselves. All mutation is
//! create, rename, or delete, so several processes may share one queue root.

mod perms;
pub mod pool;
pub mod queue;

pub use pool::{PoolError, ResultPool};
pub use queue::{JobQueue, PendingIter, QueueCounts, QueueError, LEASED_DIR, PENDING_DIR, STAGING_DIR};
