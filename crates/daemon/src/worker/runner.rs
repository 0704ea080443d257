// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sj_adapters::{RenderAdapter, RenderError, RenderRequest};
use sj_core::RecordError;
use sj_storage::QueueError;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::{PoolCtx, SharedReceiver, Slot};

#[derive(Debug, Error)]
enum JobError {
    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// What happened to a leased job.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Rendered,
    AlreadyPresent,
}

/// Take paths off the channel until terminated or the channel closes.
pub(super) async fn run<R: RenderAdapter>(
    ctx: Arc<PoolCtx<R>>,
    rx: SharedReceiver,
    _slot: Slot,
    worker: usize,
) {
    debug!(worker, "worker started");
    while !ctx.scoreboard.is_terminated() {
        let received = timeout(ctx.poll_interval, async { rx.lock().await.recv().await }).await;
        match received {
            Ok(Some(job)) => {
                // a path may sit in the channel across a terminate
                if ctx.scoreboard.is_terminated() {
                    break;
                }
                process(&ctx, worker, &job).await;
            }
            Ok(None) => break,
            Err(_) => continue,
        }
    }
    debug!(worker, "worker stopped");
}

/// Lease, render, discard. Errors are logged and never stop the worker.
async fn process<R: RenderAdapter>(ctx: &PoolCtx<R>, worker: usize, pending: &Path) {
    let leased = match ctx.queue.lease(pending) {
        Ok(Some(leased)) => leased,
        Ok(None) => return,
        Err(e) => {
            warn!(worker, job = %pending.display(), error = %e, "lease failed");
            return;
        }
    };

    match render_leased(ctx, &leased).await {
        Ok(Outcome::Rendered) => info!(worker, job = %leased.display(), "job rendered"),
        Ok(Outcome::AlreadyPresent) => {
            debug!(worker, job = %leased.display(), "image already present, render skipped")
        }
        Err(e) => warn!(worker, job = %leased.display(), error = %e, "job failed"),
    }
    ctx.queue.discard(&leased);
}

async fn render_leased<R: RenderAdapter>(
    ctx: &PoolCtx<R>,
    leased: &Path,
) -> Result<Outcome, JobError> {
    let record = ctx.queue.read_job(leased)?;
    let (url, target_file) = record.require_render_fields()?;

    let target_file = PathBuf::from(target_file);
    if target_file.exists() {
        return Ok(Outcome::AlreadyPresent);
    }
    let log_file = match record.log_file() {
        Some(log) if !log.is_empty() => PathBuf::from(log),
        _ => target_file.with_extension("log"),
    };
    let request = RenderRequest {
        url: url.to_string(),
        target_file,
        log_file,
        user_agent: record.user_agent().unwrap_or_default().to_string(),
    };

    info!(url = %request.url, target = %request.target_file.display(), "rendering");
    ctx.renderer.render(&request).await?;
    Ok(Outcome::Rendered)
}
