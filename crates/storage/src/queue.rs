// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable job queue built on three sibling directories.
//!
//! ```text
//! <root>/staging/.<id>   being written, invisible to workers
//! <root>/pending/<id>    complete, unowned
//! <root>/leased/<id>     owned by exactly one worker
//! ```
//!
//! Both transitions are a single `rename(2)`. A writer only renames a record
//! into `pending` after every line is written and synced, so a crash leaves at
//! most a stray staging file. A worker owns a job iff its rename from
//! `pending` to `leased` succeeded; everyone else sees `NotFound`.

use std::ffi::OsStr;
use std::fs::{self, ReadDir};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use sj_core::{JobRecord, RecordError};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::perms;

pub const STAGING_DIR: &str = "staging";
pub const PENDING_DIR: &str = "pending";
pub const LEASED_DIR: &str = "leased";

/// Marks a file in `staging`; stripped when the record is published.
const STAGING_MARKER: char = '.';
/// Random id length. 64^16 names make collisions negligible.
const JOB_ID_LEN: usize = 16;
const CREATE_ATTEMPTS: usize = 3;

/// Errors from queue operations
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid job record: {0}")]
    InvalidRecord(#[from] RecordError),

    #[error("invalid job id {0:?}")]
    InvalidId(PathBuf),

    #[error("malformed job file {0}")]
    Malformed(PathBuf),
}

/// Entry counts per queue directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueCounts {
    pub staging: usize,
    pub pending: usize,
    pub leased: usize,
}

/// Handle to a queue root. Cheap to clone; holds no open files.
#[derive(Debug, Clone)]
pub struct JobQueue {
    root: PathBuf,
    staging: PathBuf,
    pending: PathBuf,
    leased: PathBuf,
}

impl JobQueue {
    /// Handle for an existing queue root. Does not touch the filesystem.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            staging: root.join(STAGING_DIR),
            pending: root.join(PENDING_DIR),
            leased: root.join(LEASED_DIR),
            root,
        }
    }

    /// Open a queue root, creating the three directories if missing.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, QueueError> {
        let queue = Self::at(root);
        for dir in [&queue.staging, &queue.pending, &queue.leased] {
            perms::create_dir_all(dir)?;
        }
        Ok(queue)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn pending_dir(&self) -> &Path {
        &self.pending
    }

    pub fn leased_dir(&self) -> &Path {
        &self.leased
    }

    /// Write a record and publish it to `pending`.
    ///
    /// Returns the pending path. On any failure the staging file is removed
    /// and nothing becomes visible to workers.
    pub fn write_job(&self, record: &JobRecord) -> Result<PathBuf, QueueError> {
        record.validate()?;
        let (staged, mut file) = self.create_staging_file()?;

        let written = write_record(&mut file, record).and_then(|()| file.sync_all());
        drop(file);
        if let Err(e) = written {
            remove_quietly(&staged);
            return Err(e.into());
        }

        match self.publish(&staged) {
            Ok(path) => {
                debug!(job = %path.display(), "job published");
                Ok(path)
            }
            Err(e) => {
                remove_quietly(&staged);
                Err(e)
            }
        }
    }

    fn create_staging_file(&self) -> Result<(PathBuf, fs::File), QueueError> {
        let mut last_err = None;
        for _ in 0..CREATE_ATTEMPTS {
            let name = format!("{}{}", STAGING_MARKER, nanoid::nanoid!(JOB_ID_LEN));
            let path = self.staging.join(name);
            match perms::create_new(&path) {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => last_err = Some(e),
                Err(e) => return Err(e.into()),
            }
        }
        Err(last_err.unwrap_or_else(|| io::Error::other("staging name collision")).into())
    }

    /// Rename a fully written staging file into `pending`.
    fn publish(&self, staged: &Path) -> Result<PathBuf, QueueError> {
        let name = staged
            .file_name()
            .and_then(OsStr::to_str)
            .and_then(|n| n.strip_prefix(STAGING_MARKER))
            .filter(|n| !n.is_empty())
            .ok_or_else(|| QueueError::InvalidId(staged.to_path_buf()))?;
        let target = self.pending.join(name);
        fs::rename(staged, &target)?;
        Ok(target)
    }

    /// Lazily list `pending`.
    ///
    /// A best-effort snapshot: jobs published while iterating may or may not
    /// appear. Call again to restart.
    pub fn list_pending(&self) -> Result<PendingIter, QueueError> {
        Ok(PendingIter { entries: fs::read_dir(&self.pending)? })
    }

    /// Try to take ownership of a pending job.
    ///
    /// `Ok(None)` means the job is gone, most likely leased by another worker.
    /// That is an expected outcome; do not retry the same id.
    pub fn lease(&self, pending: &Path) -> Result<Option<PathBuf>, QueueError> {
        let name = job_name(pending)?;
        let source = self.pending.join(name);
        let target = self.leased.join(name);
        // Stamp before the rename so a lease never lands in `leased` looking
        // stale to `recover_stranded`; rename keeps mtime.
        if let Err(e) = touch(&source) {
            if e.kind() == io::ErrorKind::NotFound {
                debug!(job = %pending.display(), "lease lost");
                return Ok(None);
            }
            warn!(job = %pending.display(), error = %e, "cannot stamp lease time");
        }
        match fs::rename(&source, &target) {
            Ok(()) => Ok(Some(target)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(job = %pending.display(), "lease lost");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Parse a leased job file.
    pub fn read_job(&self, leased: &Path) -> Result<JobRecord, QueueError> {
        let text = fs::read_to_string(leased)?;
        let record = JobRecord::parse(&text);
        if record.is_empty() {
            return Err(QueueError::Malformed(leased.to_path_buf()));
        }
        Ok(record)
    }

    /// Remove a leased job. Called exactly once per lease, whatever the outcome.
    pub fn discard(&self, leased: &Path) {
        if let Err(e) = fs::remove_file(leased) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!(job = %leased.display(), error = %e, "failed to discard leased job");
            }
        }
    }

    /// Return leased jobs older than `max_age` to `pending`.
    ///
    /// Age counts from the lease, since [`JobQueue::lease`] stamps the mtime.
    ///
    /// A leased file only outlives its worker when the process died mid-job.
    /// The age threshold keeps this safe while another process sharing the
    /// queue is still rendering.
    pub fn recover_stranded(&self, max_age: Duration) -> Result<usize, QueueError> {
        let mut recovered = 0;
        for entry in fs::read_dir(&self.leased)?.flatten() {
            let path = entry.path();
            let age = entry
                .metadata()
                .and_then(|m| m.modified())
                .ok()
                .and_then(|mtime| mtime.elapsed().ok())
                .unwrap_or_default();
            if age < max_age {
                continue;
            }
            let Some(name) = path.file_name() else { continue };
            match fs::rename(&path, self.pending.join(name)) {
                Ok(()) => {
                    info!(job = %path.display(), age_secs = age.as_secs(), "recovered stranded job");
                    recovered += 1;
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => warn!(job = %path.display(), error = %e, "failed to recover stranded job"),
            }
        }
        Ok(recovered)
    }

    /// Count entries in each directory.
    pub fn counts(&self) -> Result<QueueCounts, QueueError> {
        let count = |dir: &Path| -> Result<usize, QueueError> {
            Ok(fs::read_dir(dir)?.flatten().count())
        };
        Ok(QueueCounts {
            staging: count(&self.staging)?,
            pending: self.list_pending()?.count(),
            leased: count(&self.leased)?,
        })
    }
}

/// Iterator over pending job paths, see [`JobQueue::list_pending`].
pub struct PendingIter {
    entries: ReadDir,
}

impl Iterator for PendingIter {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        for entry in self.entries.by_ref() {
            let Ok(entry) = entry else { continue };
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            let hidden = entry.file_name().to_string_lossy().starts_with(STAGING_MARKER);
            if is_file && !hidden {
                return Some(entry.path());
            }
        }
        None
    }
}

fn write_record(out: &mut impl Write, record: &JobRecord) -> io::Result<()> {
    for line in record.lines() {
        out.write_all(line.as_bytes())?;
    }
    out.flush()
}

/// Bare file name of a job path, rejecting anything that could escape the
/// queue directories.
fn job_name(path: &Path) -> Result<&OsStr, QueueError> {
    match path.file_name() {
        Some(name) if !name.to_string_lossy().starts_with(STAGING_MARKER) => Ok(name),
        _ => Err(QueueError::InvalidId(path.to_path_buf())),
    }
}

/// Set a file's mtime to now.
fn touch(path: &Path) -> io::Result<()> {
    fs::OpenOptions::new().write(true).open(path)?.set_modified(SystemTime::now())
}

fn remove_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!(path = %path.display(), error = %e, "failed to remove staging file");
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
