// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::future::Future;

use tokio::signal::unix::{signal, SignalKind};
use tracing::info;

use super::LifecycleError;

/// Resolves on SIGTERM or SIGINT. SIGHUP is logged and otherwise ignored.
///
/// Handlers are installed before this returns, so a signal arriving while
/// the daemon is still starting up is not lost.
pub fn shutdown_signal() -> Result<impl Future<Output = ()>, LifecycleError> {
    let mut sigterm = signal(SignalKind::terminate()).map_err(LifecycleError::Signal)?;
    let mut sigint = signal(SignalKind::interrupt()).map_err(LifecycleError::Signal)?;
    let mut sighup = signal(SignalKind::hangup()).map_err(LifecycleError::Signal)?;

    Ok(async move {
        loop {
            tokio::select! {
                _ = sigterm.recv() => {
                    info!("received SIGTERM");
                    break;
                }
                _ = sigint.recv() => {
                    info!("received SIGINT");
                    break;
                }
                _ = sighup.recv() => info!("received SIGHUP, ignoring"),
            }
        }
    })
}
