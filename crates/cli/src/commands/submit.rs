// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use anyhow::Result;
use clap::Args;

use super::Stores;
use crate::output::{print_shot, OutputFormat};

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) snapjobs";

#[derive(Args)]
pub struct SubmitArgs {
    /// Page to capture (http or https)
    pub url: String,
    /// User agent the renderer presents
    #[arg(long, short = 'u', default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

pub fn handle(stores: &Stores, args: &SubmitArgs, format: OutputFormat) -> Result<()> {
    let info = stores.submitter().submit(&args.url, &args.user_agent)?;
    print_shot(&info, format)
}
