// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sj submit` specs

use crate::prelude::*;

#[test]
fn submit_enqueues_one_job_and_reports_running() {
    let project = Project::new();

    let run = project
        .sj()
        .args(&["-o", "json", "submit", "https://example.com/", "--user-agent", "spec-agent"])
        .passes();

    let json = run.json();
    assert_eq!(json["status"], "running");
    assert_eq!(json["code"], 2);
    assert_eq!(
        json["key"],
        "0f115db062b7c0dd030b16878c99dea5c354b49dc37b38eb8846179c7783e9d7.20"
    );

    let jobs = project.pending_jobs();
    assert_eq!(jobs.len(), 1);
    assert!(jobs[0].starts_with("URL=https://example.com/\nTargetFile="));
    assert!(jobs[0].ends_with("UserAgent=spec-agent\n"));
}

#[test]
fn submit_rejects_non_url_without_enqueuing() {
    let project = Project::new();

    project.sj().args(&["submit", "not-a-url"]).fails().stderr_has("invalid url");

    assert!(project.pending_jobs().is_empty());
}

#[test]
fn submit_of_ready_result_does_not_enqueue() {
    let project = Project::new();
    project.finish_render("0f115db062b7c0dd030b16878c99dea5c354b49dc37b38eb8846179c7783e9d7.20");

    project
        .sj()
        .args(&["submit", "https://example.com/"])
        .passes()
        .stdout_has("ready");

    assert!(project.pending_jobs().is_empty());
}

#[test]
fn config_can_come_from_environment() {
    let project = Project::new();

    cli()
        .env("SJ_CONFIG", project.config())
        .args(&["submit", "https://example.com/"])
        .passes()
        .stdout_has("running");

    assert_eq!(project.pending_jobs().len(), 1);
}
