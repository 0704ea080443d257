// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures: a throwaway snapjobs install and a fluent runner.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::Command;
use tempfile::TempDir;

/// `sj` with no config available.
pub fn cli() -> CliBuilder {
    let mut cmd = Command::cargo_bin("sj").unwrap();
    cmd.env_remove("SJ_CONFIG").env("NO_COLOR", "1");
    CliBuilder { cmd }
}

/// A temp directory holding a config file, queue root and pool root.
pub struct Project {
    dir: TempDir,
    config: PathBuf,
}

impl Project {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("snapjobs.toml");
        fs::write(
            &config,
            format!(
                "renderer_bin = \"/bin/sh\"\n\
                 renderer_script = \"{}\"\n\
                 pool_dir = \"{}\"\n\
                 queue_dir = \"{}\"\n",
                dir.path().join("rasterize.js").display(),
                dir.path().join("pool").display(),
                dir.path().join("queue").display(),
            ),
        )
        .unwrap();
        Self { dir, config }
    }

    pub fn config(&self) -> &Path {
        &self.config
    }

    /// `sj --config <this project>`
    pub fn sj(&self) -> CliBuilder {
        let mut builder = cli();
        builder.cmd.arg("--config").arg(&self.config);
        builder
    }

    pub fn pending_dir(&self) -> PathBuf {
        self.dir.path().join("queue").join("pending")
    }

    pub fn pending_jobs(&self) -> Vec<String> {
        match fs::read_dir(self.pending_dir()) {
            Ok(entries) => entries
                .flatten()
                .map(|e| fs::read_to_string(e.path()).unwrap())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Drop an image into the pool as a finished render would.
    pub fn finish_render(&self, key: &str) -> PathBuf {
        let shard = self.dir.path().join("pool").join(&key[0..2]).join(&key[2..4]);
        fs::create_dir_all(&shard).unwrap();
        let image = shard.join(format!("{key}.png"));
        fs::write(&image, b"\x89PNG\r\n\x1a\n").unwrap();
        image
    }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        assert!(output.status.success(), "expected success, got {}", describe(&output));
        RunAssert { output }
    }

    pub fn fails(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        assert!(!output.status.success(), "expected failure, got {}", describe(&output));
        RunAssert { output }
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.output.stdout).unwrap()
    }

    pub fn code(&self) -> Option<i32> {
        self.output.status.code()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(needle), "stdout missing {needle:?}:\n{stdout}");
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(needle), "stderr missing {needle:?}:\n{stderr}");
        self
    }
}

fn describe(output: &Output) -> String {
    format!(
        "{}\nstdout:\n{}\nstderr:\n{}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}
