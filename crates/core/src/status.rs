// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Result status as derived from the pool's files.

use crate::fingerprint::Fingerprint;
use serde::{Deserialize, Serialize};

/// Lifecycle of a screenshot result.
///
/// There is no persisted error state: a failed render leaves the result
/// `Running` until a later job succeeds or the files are cleaned up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotStatus {
    /// Image file present
    Ready,
    /// Log file present, image absent
    Running,
    /// Neither file present
    NotExists,
}

// 0 is reserved for errors by existing clients.
crate::coded_enum! {
    ShotStatus {
        Ready => (1, "ready"),
        Running => (2, "running"),
        NotExists => (3, "not_exists"),
    }
}

/// Point-in-time view of one result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotInfo {
    pub key: Fingerprint,
    pub status: ShotStatus,
    /// Image modification time in epoch seconds when `Ready`, otherwise 0
    pub last_update: u64,
}

impl ShotInfo {
    pub fn new(key: Fingerprint, status: ShotStatus, last_update: u64) -> Self {
        Self { key, status, last_update }
    }

    pub fn is_ready(&self) -> bool {
        self.status == ShotStatus::Ready
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
