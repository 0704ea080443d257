// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sj: submit screenshots and inspect results.

mod color;
mod commands;
mod exit_error;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{image, queue, status, submit, Stores};
use exit_error::ExitError;
use output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "sj",
    version = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_GIT_HASH")),
    about = "Screenshot job queue",
    styles = color::styles(),
)]
struct Cli {
    /// Config file (defaults to SJ_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(short = 'o', long, value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Request a screenshot of a URL
    Submit(submit::SubmitArgs),
    /// Show the status of a result
    Status(status::StatusArgs),
    /// Print the image path of a ready result
    Image(image::ImageArgs),
    /// Count jobs in each queue directory
    Queue,
}

fn main() {
    if let Err(e) = run() {
        if let Some(exit) = e.downcast_ref::<ExitError>() {
            eprintln!("{}", exit.message);
            std::process::exit(exit.code);
        }
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let stores = Stores::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Submit(args) => submit::handle(&stores, args, cli.output),
        Commands::Status(args) => status::handle(&stores, args, cli.output),
        Commands::Image(args) => image::handle(&stores, args, cli.output),
        Commands::Queue => queue::handle(&stores, cli.output),
    }
}
