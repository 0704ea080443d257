// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use anyhow::Result;
use clap::Args;

use super::Stores;
use crate::exit_error::{ExitError, NOT_READY};
use crate::output::OutputFormat;

#[derive(Args)]
pub struct ImageArgs {
    /// Result key printed by `sj submit`
    pub key: String,
}

/// Print the image path, or exit with [`NOT_READY`] when there is none yet.
pub fn handle(stores: &Stores, args: &ImageArgs, format: OutputFormat) -> Result<()> {
    let Some(path) = stores.submitter().image(&args.key)? else {
        return Err(ExitError::new(NOT_READY, format!("image not ready: {}", args.key)).into());
    };
    match format {
        OutputFormat::Text => println!("{}", path.display()),
        OutputFormat::Json => println!("{}", serde_json::json!({ "path": path })),
    }
    Ok(())
}
