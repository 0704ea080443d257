// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sj status` and `sj image` specs

use crate::prelude::*;

const KEY: &str = "0f115db062b7c0dd030b16878c99dea5c354b49dc37b38eb8846179c7783e9d7.20";

#[test]
fn status_of_unknown_key_is_not_exists() {
    let project = Project::new();
    let json = project.sj().args(&["-o", "json", "status", KEY]).passes().json();
    assert_eq!(json["status"], "not_exists");
    assert_eq!(json["code"], 3);
    assert_eq!(json["last_update"], 0);
}

#[test]
fn status_rejects_malformed_key() {
    let project = Project::new();
    project.sj().args(&["status", "../../etc/passwd"]).fails().stderr_has("invalid key");
}

#[test]
fn status_follows_submission_to_ready() {
    let project = Project::new();
    project.sj().args(&["submit", "https://example.com/"]).passes();
    project.sj().args(&["status", KEY]).passes().stdout_has("running");

    project.finish_render(KEY);

    let json = project.sj().args(&["-o", "json", "status", KEY]).passes().json();
    assert_eq!(json["status"], "ready");
    assert!(json["last_update"].as_u64().unwrap() > 0);
}

#[test]
fn image_prints_path_when_ready() {
    let project = Project::new();
    let image = project.finish_render(KEY);

    project.sj().args(&["image", KEY]).passes().stdout_has(&image.display().to_string());
}

#[test]
fn image_exits_two_when_not_ready() {
    let project = Project::new();
    let run = project.sj().args(&["image", KEY]).fails();
    assert_eq!(run.code(), Some(2));
    assert!(run.stderr().contains("image not ready"));
}
