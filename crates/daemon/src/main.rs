// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! sjd: screenshot render daemon.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sj_daemon::{lifecycle, logging, Config, LifecycleError};
use tracing::error;

#[derive(Parser)]
#[command(name = "sjd", version, about = "Screenshot render daemon")]
struct Cli {
    /// Config file (falls back to SJ_CONFIG)
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("sjd: {e}");
            return ExitCode::FAILURE;
        }
    };

    let _guard = match logging::init(config.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("sjd: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "daemon failed to start");
            eprintln!("sjd: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Config) -> Result<(), LifecycleError> {
    let shutdown = lifecycle::shutdown_signal()?;
    let daemon = lifecycle::startup(config)?;
    daemon.run(shutdown).await;
    Ok(())
}
