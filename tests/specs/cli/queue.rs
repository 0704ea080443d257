// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sj queue` specs

use crate::prelude::*;

#[test]
fn queue_counts_pending_submissions() {
    let project = Project::new();
    project.sj().args(&["submit", "https://example.com/a"]).passes();
    project.sj().args(&["submit", "https://example.com/b"]).passes();

    let json = project.sj().args(&["-o", "json", "queue"]).passes().json();

    assert_eq!(json["pending"], 2);
    assert_eq!(json["leased"], 0);
    assert_eq!(json["staging"], 0);
}

#[test]
fn queue_text_output_names_directories() {
    let project = Project::new();
    project
        .sj()
        .args(&["queue"])
        .passes()
        .stdout_has("staging:")
        .stdout_has("pending: 0")
        .stdout_has("leased:");
}
