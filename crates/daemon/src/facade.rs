// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Submission and status lookup.
//!
//! The only entry point that writes jobs. Stateless apart from the two stores,
//! so any number of submitters may share them with a running daemon.

use std::path::PathBuf;

use sj_core::{
    fingerprint, validate_url, Clock, Fingerprint, FingerprintError, JobRecord, ShotInfo,
    ShotStatus, SystemClock, UrlError,
};
use sj_storage::{JobQueue, PoolError, QueueError, ResultPool};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("url is empty")]
    EmptyUrl,

    #[error("user agent is empty")]
    EmptyUserAgent,

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] UrlError),

    #[error("cannot record submission: {0}")]
    Log(#[from] PoolError),

    #[error("cannot enqueue job: {0}")]
    Queue(#[from] QueueError),
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("invalid key: {0}")]
    InvalidKey(#[from] FingerprintError),
}

#[derive(Debug, Clone)]
pub struct Submitter<C: Clock = SystemClock> {
    queue: JobQueue,
    pool: ResultPool,
    clock: C,
}

impl Submitter<SystemClock> {
    pub fn new(queue: JobQueue, pool: ResultPool) -> Self {
        Self::with_clock(queue, pool, SystemClock)
    }
}

impl<C: Clock> Submitter<C> {
    pub fn with_clock(queue: JobQueue, pool: ResultPool, clock: C) -> Self {
        Self { queue, pool, clock }
    }

    /// Request a screenshot of `url`.
    ///
    /// Ready results are returned as-is. Anything else gets a log line and a
    /// fresh job, so a failed render can be retried by submitting again;
    /// duplicate jobs are absorbed by the worker's target-exists check.
    pub fn submit(&self, url: &str, user_agent: &str) -> Result<ShotInfo, SubmitError> {
        if url.trim().is_empty() {
            return Err(SubmitError::EmptyUrl);
        }
        if user_agent.trim().is_empty() {
            return Err(SubmitError::EmptyUserAgent);
        }
        validate_url(url)?;

        let key = fingerprint(url);
        let current = self.pool.status(&key);
        if current.is_ready() {
            debug!(%key, "already rendered");
            return Ok(current);
        }

        let record = JobRecord::render(
            url,
            &self.pool.image_path(&key),
            &self.pool.log_path(&key),
            user_agent,
        );
        // The log file marks the key RUNNING, so nothing is written for a
        // record the queue would refuse.
        record.validate().map_err(QueueError::from)?;
        self.pool.append_log(&key, &format!("{}\t{url}\n", self.clock.epoch_secs()))?;
        let job = self.queue.write_job(&record)?;
        info!(%key, %url, job = %job.display(), "screenshot queued");

        Ok(ShotInfo::new(key, ShotStatus::Running, 0))
    }

    /// Status for a client-supplied key.
    pub fn lookup(&self, key: &str) -> Result<ShotInfo, LookupError> {
        let key = Fingerprint::parse(key)?;
        Ok(self.pool.status(&key))
    }

    /// Image path for a client-supplied key, when the result is ready.
    pub fn image(&self, key: &str) -> Result<Option<PathBuf>, LookupError> {
        let key = Fingerprint::parse(key)?;
        Ok(self.pool.status(&key).is_ready().then(|| self.pool.image_path(&key)))
    }
}

#[cfg(test)]
#[path = "facade_tests.rs"]
mod tests;
