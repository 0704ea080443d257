// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use anyhow::Result;
use clap::Args;

use super::Stores;
use crate::output::{print_shot, OutputFormat};

#[derive(Args)]
pub struct StatusArgs {
    /// Result key printed by `sj submit`
    pub key: String,
}

pub fn handle(stores: &Stores, args: &StatusArgs, format: OutputFormat) -> Result<()> {
    let info = stores.submitter().lookup(&args.key)?;
    print_shot(&info, format)
}
