// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Render adapter: turns a URL into an image file.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from render operations
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to spawn renderer: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("renderer exited with {0}")]
    Failed(ExitStatus),

    #[error("renderer timed out after {0:?}")]
    Timeout(Duration),

    #[error("render failed: {0}")]
    Other(String),
}

/// One render invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub url: String,
    pub target_file: PathBuf,
    pub log_file: PathBuf,
    pub user_agent: String,
}

/// Adapter for producing screenshots
#[async_trait]
pub trait RenderAdapter: Clone + Send + Sync + 'static {
    /// Render `request.url` into `request.target_file`.
    ///
    /// Occupies the caller until the renderer is done. Diagnostics may be
    /// appended to `request.log_file`.
    async fn render(&self, request: &RenderRequest) -> Result<(), RenderError>;
}

/// Runs an external headless-browser binary:
/// `<binary> <script> <url> <target> <log> <user-agent>`.
///
/// The child's stdout and stderr are appended to the job's log file.
#[derive(Debug, Clone)]
pub struct ProcessRenderAdapter {
    binary: PathBuf,
    script: PathBuf,
    timeout: Option<Duration>,
}

impl ProcessRenderAdapter {
    pub fn new(binary: impl Into<PathBuf>, script: impl Into<PathBuf>) -> Self {
        Self { binary: binary.into(), script: script.into(), timeout: None }
    }

    /// Kill the renderer if it runs longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout.filter(|t| !t.is_zero());
        self
    }

    fn output_for(&self, request: &RenderRequest) -> (Stdio, Stdio) {
        let opened = OpenOptions::new().append(true).create(true).open(&request.log_file);
        match opened.and_then(|out| Ok((out.try_clone()?, out))) {
            Ok((stdout, stderr)) => (stdout.into(), stderr.into()),
            Err(e) => {
                tracing::warn!(
                    log = %request.log_file.display(),
                    error = %e,
                    "cannot open render log, discarding renderer output"
                );
                (Stdio::null(), Stdio::null())
            }
        }
    }
}

#[async_trait]
impl RenderAdapter for ProcessRenderAdapter {
    async fn render(&self, request: &RenderRequest) -> Result<(), RenderError> {
        let (stdout, stderr) = self.output_for(request);
        let mut cmd = tokio::process::Command::new(&self.binary);
        cmd.arg(&self.script)
            .arg(&request.url)
            .arg(&request.target_file)
            .arg(&request.log_file)
            .arg(&request.user_agent)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .kill_on_drop(true);

        tracing::info!(
            url = %request.url,
            target = %request.target_file.display(),
            "starting renderer"
        );
        let mut child = cmd.spawn().map_err(RenderError::Spawn)?;

        let status = match self.timeout {
            None => child.wait().await.map_err(RenderError::Spawn)?,
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(waited) => waited.map_err(RenderError::Spawn)?,
                Err(_) => {
                    if let Err(e) = child.kill().await {
                        tracing::warn!(url = %request.url, error = %e, "failed to kill renderer");
                    }
                    return Err(RenderError::Timeout(limit));
                }
            },
        };

        if status.success() {
            Ok(())
        } else {
            Err(RenderError::Failed(status))
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{RenderAdapter, RenderError, RenderRequest};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use tokio::sync::Semaphore;

    /// Recorded render invocation
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RenderCall {
        pub request: RenderRequest,
    }

    struct FakeRenderState {
        calls: Vec<RenderCall>,
        fail: bool,
    }

    /// Fake renderer for testing.
    ///
    /// Records every call and, unless told to fail, writes a small PNG header
    /// to the target file. A gated fake holds each render until [`release`]
    /// hands it a permit, which lets tests keep a render in flight.
    ///
    /// [`release`]: FakeRenderAdapter::release
    #[derive(Clone)]
    pub struct FakeRenderAdapter {
        inner: Arc<Mutex<FakeRenderState>>,
        gate: Option<Arc<Semaphore>>,
    }

    impl Default for FakeRenderAdapter {
        fn default() -> Self {
            Self {
                inner: Arc::new(Mutex::new(FakeRenderState { calls: Vec::new(), fail: false })),
                gate: None,
            }
        }
    }

    impl FakeRenderAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        /// A fake whose renders block until released.
        pub fn gated() -> Self {
            Self { gate: Some(Arc::new(Semaphore::new(0))), ..Self::default() }
        }

        /// Let `n` blocked (or future) renders proceed.
        pub fn release(&self, n: usize) {
            if let Some(gate) = &self.gate {
                gate.add_permits(n);
            }
        }

        /// Make subsequent renders fail without writing an image.
        pub fn set_fail(&self, fail: bool) {
            self.inner.lock().fail = fail;
        }

        /// Get all recorded renders (including ones still blocked)
        pub fn calls(&self) -> Vec<RenderCall> {
            self.inner.lock().calls.clone()
        }

        pub fn call_count(&self) -> usize {
            self.inner.lock().calls.len()
        }
    }

    #[async_trait]
    impl RenderAdapter for FakeRenderAdapter {
        async fn render(&self, request: &RenderRequest) -> Result<(), RenderError> {
            self.inner.lock().calls.push(RenderCall { request: request.clone() });

            if let Some(gate) = &self.gate {
                let permit = gate
                    .acquire()
                    .await
                    .map_err(|e| RenderError::Other(format!("gate closed: {e}")))?;
                permit.forget();
            }

            if self.inner.lock().fail {
                return Err(RenderError::Other("fake failure".to_string()));
            }

            if let Some(parent) = request.target_file.parent() {
                std::fs::create_dir_all(parent).map_err(|e| RenderError::Other(e.to_string()))?;
            }
            std::fs::write(&request.target_file, b"\x89PNG\r\n\x1a\n")
                .map_err(|e| RenderError::Other(e.to_string()))?;
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeRenderAdapter, RenderCall};

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
