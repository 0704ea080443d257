// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use std::sync::Arc;

use sj_adapters::RenderAdapter;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::{PoolCtx, Slot};

/// Scan `pending` every poll interval until terminated.
///
/// Dropping `tx` on exit closes the channel, which idle workers take as their
/// signal to stop.
pub(super) async fn run<R: RenderAdapter>(
    ctx: Arc<PoolCtx<R>>,
    tx: mpsc::Sender<PathBuf>,
    _slot: Slot,
) {
    info!("dispatcher started");
    'scan: while !ctx.scoreboard.is_terminated() {
        match ctx.queue.list_pending() {
            Ok(pending) => {
                for job in pending {
                    if !offer(&ctx, &tx, job).await {
                        break 'scan;
                    }
                }
            }
            Err(e) => {
                warn!(queue = %ctx.queue.root().display(), error = %e, "cannot list pending jobs")
            }
        }
        tokio::time::sleep(ctx.poll_interval).await;
    }
    drop(tx);
    info!("dispatcher stopped");
}

/// Hand one path to the workers. Returns false once the pool is stopping.
///
/// Waits for channel capacity one poll interval at a time so termination is
/// noticed even while every worker is busy rendering.
async fn offer<R>(ctx: &PoolCtx<R>, tx: &mpsc::Sender<PathBuf>, job: PathBuf) -> bool {
    loop {
        if ctx.scoreboard.is_terminated() {
            return false;
        }
        match timeout(ctx.poll_interval, tx.reserve()).await {
            Ok(Ok(permit)) => {
                debug!(job = %job.display(), "job offered");
                permit.send(job);
                return true;
            }
            // every worker has exited
            Ok(Err(_)) => return false,
            Err(_) => continue,
        }
    }
}
