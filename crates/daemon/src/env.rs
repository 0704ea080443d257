// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;
use std::time::Duration;

/// Config file path: `SJ_CONFIG`
pub fn config_path() -> Option<PathBuf> {
    non_empty("SJ_CONFIG").map(PathBuf::from)
}

/// Render concurrency override: `SJ_MAX_CONCURRENCY`
pub fn max_concurrency() -> Option<u8> {
    non_empty("SJ_MAX_CONCURRENCY").and_then(|s| s.parse::<u8>().ok())
}

/// Result pool root override: `SJ_POOL_DIR`
pub fn pool_dir() -> Option<PathBuf> {
    non_empty("SJ_POOL_DIR").map(PathBuf::from)
}

/// Job queue root override: `SJ_QUEUE_DIR`
pub fn queue_dir() -> Option<PathBuf> {
    non_empty("SJ_QUEUE_DIR").map(PathBuf::from)
}

/// Daemon log file override: `SJ_LOG_FILE`
pub fn log_file() -> Option<PathBuf> {
    non_empty("SJ_LOG_FILE").map(PathBuf::from)
}

/// Queue poll interval override: `SJ_POLL_INTERVAL_MS`
pub fn poll_interval() -> Option<Duration> {
    non_empty("SJ_POLL_INTERVAL_MS")
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
}

fn non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}
