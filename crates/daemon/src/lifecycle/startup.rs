// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon startup and initialization logic.

use sj_adapters::{ProcessRenderAdapter, RenderAdapter};
use sj_storage::{JobQueue, ResultPool};
use tracing::info;

use crate::config::{Config, ConfigError};

use super::{Daemon, LifecycleError};

/// Start the daemon with the configured external renderer.
pub fn startup(config: &Config) -> Result<Daemon<ProcessRenderAdapter>, LifecycleError> {
    config.validate()?;
    let renderer =
        ProcessRenderAdapter::new(config.renderer_bin.clone(), config.renderer_script.clone())
            .with_timeout(config.render_timeout());
    startup_with(config, renderer)
}

/// Start the daemon with any renderer.
pub fn startup_with<R: RenderAdapter>(
    config: &Config,
    renderer: R,
) -> Result<Daemon<R>, LifecycleError> {
    if config.max_concurrency == 0 {
        return Err(ConfigError::NoConcurrency.into());
    }

    // 1. Stores, creating directories as needed
    let queue = JobQueue::open(&config.queue_dir)?;
    let pool = ResultPool::open(&config.pool_dir)?;

    // 2. Jobs leased by a process that died mid-render
    let recovered = queue.recover_stranded(config.stale_lease_age())?;
    if recovered > 0 {
        info!(recovered, "returned stranded jobs to pending");
    }

    info!(expire_secs = config.expire_secs, "result expiry is not enforced");
    info!(
        max_concurrency = config.max_concurrency,
        queue = %queue.root().display(),
        pool = %pool.root().display(),
        renderer = %config.renderer_bin.display(),
        "daemon started"
    );

    Ok(Daemon { config: config.clone(), queue, pool, renderer })
}

#[cfg(test)]
#[path = "startup_tests.rs"]
mod tests;
