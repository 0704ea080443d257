// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration.
//!
//! Loaded from a TOML file, then overridden by `SJ_*` environment variables
//! (see [`crate::env`]). Only `renderer_bin` and `renderer_script` are
//! required.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::env;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config file given (pass a path or set SJ_CONFIG)")]
    NoConfigFile,

    #[error("cannot read config {0}: {1}")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("invalid config {0}: {1}")]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("max_concurrency must be at least 1")]
    NoConcurrency,

    #[error("renderer binary not found: {0}")]
    RendererMissing(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum number of renders running at once
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: u8,
    /// Root of the sharded result pool
    #[serde(default = "default_pool_dir")]
    pub pool_dir: PathBuf,
    /// Root of the job queue (`staging`/`pending`/`leased`)
    #[serde(default = "default_queue_dir")]
    pub queue_dir: PathBuf,
    /// Headless browser executable
    pub renderer_bin: PathBuf,
    /// Script handed to the renderer as its first argument
    pub renderer_script: PathBuf,
    /// Daemon log file; stderr when unset
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    /// Result lifetime in seconds.
    ///
    /// Accepted for compatibility with existing config files. Nothing reads it:
    /// a ready result stays ready until its files are removed.
    #[serde(default = "default_expire_secs")]
    pub expire_secs: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Kill a render after this many seconds; 0 waits forever
    #[serde(default)]
    pub render_timeout_secs: u64,
    /// Leased jobs older than this are returned to `pending` at startup
    #[serde(default = "default_stale_lease_secs")]
    pub stale_lease_secs: u64,
}

fn default_max_concurrency() -> u8 {
    5
}

fn default_pool_dir() -> PathBuf {
    PathBuf::from("/var/lib/snapjobs/pool")
}

fn default_queue_dir() -> PathBuf {
    PathBuf::from("/var/lib/snapjobs/queue")
}

fn default_expire_secs() -> u64 {
    7200
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_stale_lease_secs() -> u64 {
    3600
}

impl Config {
    /// Load from `path`, or from `SJ_CONFIG` when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => env::config_path().ok_or(ConfigError::NoConfigFile)?,
        };
        let text =
            std::fs::read_to_string(&path).map_err(|e| ConfigError::Read(path.clone(), e))?;
        let mut config = Self::parse(&text).map_err(|e| ConfigError::Parse(path, e))?;
        config.apply_env();
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    fn apply_env(&mut self) {
        if let Some(n) = env::max_concurrency() {
            self.max_concurrency = n;
        }
        if let Some(dir) = env::pool_dir() {
            self.pool_dir = dir;
        }
        if let Some(dir) = env::queue_dir() {
            self.queue_dir = dir;
        }
        if let Some(file) = env::log_file() {
            self.log_file = Some(file);
        }
        if let Some(interval) = env::poll_interval() {
            self.poll_interval_ms = interval.as_millis() as u64;
        }
    }

    /// Checks that must pass before the daemon starts.
    ///
    /// Directory creation is checked separately when the stores are opened.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrency == 0 {
            return Err(ConfigError::NoConcurrency);
        }
        if !self.renderer_bin.is_file() {
            return Err(ConfigError::RendererMissing(self.renderer_bin.clone()));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn render_timeout(&self) -> Option<Duration> {
        (self.render_timeout_secs > 0).then(|| Duration::from_secs(self.render_timeout_secs))
    }

    pub fn stale_lease_age(&self) -> Duration {
        Duration::from_secs(self.stale_lease_secs)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
