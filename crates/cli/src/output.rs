// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use serde::Serialize;
use sj_core::{ShotInfo, ShotStatus};
use sj_storage::QueueCounts;

use crate::color;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// JSON shape of a result status. `code` is the numeric status older
/// clients expect.
#[derive(Serialize)]
struct ShotView<'a> {
    key: &'a str,
    status: ShotStatus,
    code: u8,
    last_update: u64,
}

pub fn shot_json(info: &ShotInfo) -> serde_json::Value {
    let view = ShotView {
        key: info.key.as_str(),
        status: info.status,
        code: info.status.code(),
        last_update: info.last_update,
    };
    serde_json::to_value(view).unwrap_or_default()
}

pub fn shot_text(info: &ShotInfo) -> String {
    let updated = match info.last_update {
        0 => "-".to_string(),
        secs => secs.to_string(),
    };
    format!(
        "{} {}\n{} {}\n{} {}",
        color::header("key:    "),
        info.key,
        color::header("status: "),
        color::status(info.status),
        color::header("updated:"),
        updated,
    )
}

pub fn print_shot(info: &ShotInfo, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{}", shot_text(info)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&shot_json(info))?),
    }
    Ok(())
}

pub fn counts_json(counts: &QueueCounts) -> serde_json::Value {
    serde_json::json!({
        "staging": counts.staging,
        "pending": counts.pending,
        "leased": counts.leased,
    })
}

pub fn counts_text(counts: &QueueCounts) -> String {
    format!(
        "{} {}\n{} {}\n{} {}",
        color::header("staging:"),
        counts.staging,
        color::header("pending:"),
        counts.pending,
        color::header("leased: "),
        counts.leased,
    )
}

pub fn print_counts(counts: &QueueCounts, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{}", counts_text(counts)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&counts_json(counts))?),
    }
    Ok(())
}
