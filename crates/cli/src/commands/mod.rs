// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod image;
pub mod queue;
pub mod status;
pub mod submit;

use std::path::Path;

use anyhow::{Context, Result};
use sj_daemon::{Config, Submitter};
use sj_storage::{JobQueue, ResultPool};

/// Stores named by the daemon's config file.
pub struct Stores {
    pub queue: JobQueue,
    pub pool: ResultPool,
}

impl Stores {
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = Config::load(config_path).context("loading config")?;
        let queue = JobQueue::open(&config.queue_dir)
            .with_context(|| format!("opening queue at {}", config.queue_dir.display()))?;
        Ok(Self { queue, pool: ResultPool::new(&config.pool_dir) })
    }

    pub fn submitter(&self) -> Submitter {
        Submitter::new(self.queue.clone(), self.pool.clone())
    }
}
