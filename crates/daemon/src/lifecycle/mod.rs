// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle: startup, run, drain.

mod signals;
mod startup;

pub use signals::shutdown_signal;
pub use startup::{startup, startup_with};

use std::future::Future;

use sj_adapters::RenderAdapter;
use sj_storage::{JobQueue, PoolError, QueueError, ResultPool};
use thiserror::Error;
use tracing::info;

use crate::config::{Config, ConfigError};
use crate::facade::Submitter;
use crate::worker::WorkerPool;

/// A started daemon: stores opened, stranded jobs recovered, workers not yet
/// running.
pub struct Daemon<R> {
    config: Config,
    queue: JobQueue,
    pool: ResultPool,
    renderer: R,
}

impl<R: RenderAdapter> Daemon<R> {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn queue(&self) -> &JobQueue {
        &self.queue
    }

    pub fn pool(&self) -> &ResultPool {
        &self.pool
    }

    /// A submitter over the same stores the workers consume.
    pub fn submitter(&self) -> Submitter {
        Submitter::new(self.queue.clone(), self.pool.clone())
    }

    /// Run the worker pool until `shutdown` resolves, then drain.
    ///
    /// Renders in flight when `shutdown` fires are allowed to finish; no new
    /// job is leased after that point.
    pub async fn run(self, shutdown: impl Future<Output = ()>) {
        let poll = self.config.poll_interval();
        let handle =
            WorkerPool::new(self.queue, self.renderer, self.config.max_concurrency, poll).spawn();

        shutdown.await;
        info!(active = handle.scoreboard().active(), "shutdown requested, draining workers");
        handle.shutdown(poll).await;
        info!("daemon stopped");
    }
}

/// Errors that stop the daemon from starting
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("queue error: {0}")]
    Queue(#[from] QueueError),

    #[error("result pool error: {0}")]
    Pool(#[from] PoolError),

    #[error("cannot install signal handlers: {0}")]
    Signal(#[source] std::io::Error),

    #[error("cannot open log file: {0}")]
    Logging(#[source] std::io::Error),
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
