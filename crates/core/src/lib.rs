// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sj-core: Core types for the snapjobs screenshot queue

pub mod macros;

pub mod clock;
pub mod fingerprint;
pub mod job;
pub mod status;
pub mod url_check;

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;
pub use fingerprint::{fingerprint, Fingerprint, FingerprintError};
pub use job::{JobRecord, RecordError};
pub use status::{ShotInfo, ShotStatus};
pub use url_check::{validate_url, UrlError};
