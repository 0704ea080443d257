// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker pool: one dispatcher feeding a fixed set of render workers.
//!
//! The dispatcher lists `pending` and offers each path on a bounded channel.
//! Workers race to lease what they receive; the queue's rename decides the
//! winner, so a path offered twice is harmless. Everyone holds a scoreboard
//! [`Slot`] for as long as it runs, which is what the drain loop watches.

mod dispatcher;
mod runner;
mod scoreboard;

pub use scoreboard::{Scoreboard, Slot};

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use sj_adapters::RenderAdapter;
use sj_storage::JobQueue;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Paths in flight between dispatcher and workers.
const CHANNEL_CAPACITY: usize = 1;

/// State shared by the dispatcher and every worker.
struct PoolCtx<R> {
    queue: JobQueue,
    renderer: R,
    scoreboard: Scoreboard,
    poll_interval: Duration,
}

type SharedReceiver = Arc<Mutex<mpsc::Receiver<PathBuf>>>;

pub struct WorkerPool<R> {
    queue: JobQueue,
    renderer: R,
    scoreboard: Scoreboard,
    poll_interval: Duration,
}

impl<R: RenderAdapter> WorkerPool<R> {
    /// A pool running at most `max_concurrency` renders.
    ///
    /// The dispatcher takes a scoreboard slot of its own on top of that.
    pub fn new(queue: JobQueue, renderer: R, max_concurrency: u8, poll_interval: Duration) -> Self {
        Self {
            queue,
            renderer,
            scoreboard: Scoreboard::new(usize::from(max_concurrency) + 1),
            poll_interval,
        }
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Start the dispatcher and fill every free slot with a worker.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(self) -> WorkerPoolHandle {
        let scoreboard = self.scoreboard.clone();
        let Some(dispatcher_slot) = scoreboard.try_admit() else {
            warn!("worker pool not started: scoreboard refused the dispatcher");
            return WorkerPoolHandle { scoreboard, dispatcher: None };
        };

        let ctx = Arc::new(PoolCtx {
            queue: self.queue,
            renderer: self.renderer,
            scoreboard: self.scoreboard,
            poll_interval: self.poll_interval,
        });
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let rx: SharedReceiver = Arc::new(Mutex::new(rx));

        let mut workers = 0;
        while let Some(slot) = ctx.scoreboard.try_admit() {
            tokio::spawn(runner::run(Arc::clone(&ctx), Arc::clone(&rx), slot, workers));
            workers += 1;
        }
        info!(
            workers,
            queue = %ctx.queue.root().display(),
            poll_ms = ctx.poll_interval.as_millis() as u64,
            "worker pool started"
        );

        let dispatcher = tokio::spawn(dispatcher::run(ctx, tx, dispatcher_slot));
        WorkerPoolHandle { scoreboard, dispatcher: Some(dispatcher) }
    }
}

/// Control handle for a running pool.
pub struct WorkerPoolHandle {
    scoreboard: Scoreboard,
    dispatcher: Option<JoinHandle<()>>,
}

impl WorkerPoolHandle {
    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Ask every member to stop. Renders in flight run to completion.
    pub fn terminate(&self) {
        self.scoreboard.terminate();
    }

    /// Wait until no member holds a slot, checking every `poll`.
    pub async fn wait_drained(&self, poll: Duration) {
        while self.scoreboard.active() > 0 {
            tokio::time::sleep(poll).await;
        }
    }

    /// Terminate, then wait for the drain.
    pub async fn shutdown(mut self, poll: Duration) {
        self.terminate();
        self.wait_drained(poll).await;
        if let Some(dispatcher) = self.dispatcher.take() {
            if let Err(e) = dispatcher.await {
                warn!(error = %e, "dispatcher task failed");
            }
        }
        info!("worker pool drained");
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
