// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sj-adapters: boundaries to external processes.

pub mod render;

pub use render::{ProcessRenderAdapter, RenderAdapter, RenderError, RenderRequest};
#[cfg(any(test, feature = "test-support"))]
pub use render::{FakeRenderAdapter, RenderCall};
