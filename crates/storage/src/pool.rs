// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Content-addressed result pool.
//!
//! Each fingerprint owns a shard directory `<root>/<fp[0..2]>/<fp[2..4]>`
//! holding `<fp>.png` and `<fp>.log`. Status is derived from which of the two
//! exist; nothing else is stored.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use sj_core::{Fingerprint, ShotInfo, ShotStatus};
use thiserror::Error;

use crate::perms;

pub const IMAGE_EXT: &str = "png";
pub const LOG_EXT: &str = "log";

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct ResultPool {
    root: PathBuf,
}

impl ResultPool {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Like [`ResultPool::new`], but creates the root directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, PoolError> {
        let pool = Self::new(root);
        perms::create_dir_all(&pool.root)
            .map_err(|source| PoolError::Io { path: pool.root.clone(), source })?;
        Ok(pool)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Shard directory for a fingerprint. Pure path computation.
    pub fn locate(&self, fp: &Fingerprint) -> PathBuf {
        let (outer, inner) = fp.shard();
        self.root.join(outer).join(inner)
    }

    pub fn image_path(&self, fp: &Fingerprint) -> PathBuf {
        self.locate(fp).join(format!("{fp}.{IMAGE_EXT}"))
    }

    pub fn log_path(&self, fp: &Fingerprint) -> PathBuf {
        self.locate(fp).join(format!("{fp}.{LOG_EXT}"))
    }

    /// Current status, read without locking.
    ///
    /// A render may finish between this call and whatever the caller does
    /// next; treat the answer as a snapshot.
    pub fn status(&self, fp: &Fingerprint) -> ShotInfo {
        if let Ok(meta) = std::fs::metadata(self.image_path(fp)) {
            let mtime = meta
                .modified()
                .ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map(|d| d.as_secs())
                .unwrap_or(0);
            return ShotInfo::new(fp.clone(), ShotStatus::Ready, mtime);
        }
        if self.log_path(fp).exists() {
            return ShotInfo::new(fp.clone(), ShotStatus::Running, 0);
        }
        ShotInfo::new(fp.clone(), ShotStatus::NotExists, 0)
    }

    /// Append text to the result's log, creating the shard as needed.
    ///
    /// The log's existence is what marks a result as running before the
    /// renderer has written anything.
    pub fn append_log(&self, fp: &Fingerprint, text: &str) -> Result<(), PoolError> {
        let shard = self.locate(fp);
        perms::create_dir_all(&shard).map_err(|source| PoolError::Io { path: shard, source })?;

        let path = self.log_path(fp);
        perms::open_append(&path)
            .and_then(|mut file| file.write_all(text.as_bytes()))
            .map_err(|source| PoolError::Io { path, source })
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
