// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs

use crate::prelude::*;

#[test]
fn sj_help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("submit")
        .stdout_has("status")
        .stdout_has("image")
        .stdout_has("queue");
}

#[test]
fn sj_submit_help_shows_user_agent_flag() {
    cli().args(&["submit", "--help"]).passes().stdout_has("--user-agent");
}

#[test]
fn sj_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
fn sj_without_config_fails() {
    cli().args(&["queue"]).fails().stderr_has("SJ_CONFIG");
}
