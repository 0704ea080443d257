// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use anyhow::{Context, Result};

use super::Stores;
use crate::output::{print_counts, OutputFormat};

pub fn handle(stores: &Stores, format: OutputFormat) -> Result<()> {
    let counts = stores
        .queue
        .counts()
        .with_context(|| format!("reading queue at {}", stores.queue.root().display()))?;
    print_counts(&counts, format)
}
