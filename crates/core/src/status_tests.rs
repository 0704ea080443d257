// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::fingerprint::fingerprint;

#[yare::parameterized(
    ready      = { ShotStatus::Ready,     1, "ready" },
    running    = { ShotStatus::Running,   2, "running" },
    not_exists = { ShotStatus::NotExists, 3, "not_exists" },
)]
fn status_code_and_name(status: ShotStatus, code: u8, name: &str) {
    assert_eq!(status.code(), code);
    assert_eq!(status.to_string(), name);
    assert_eq!(serde_json::to_string(&status).unwrap(), format!("\"{name}\""));
}

#[test]
fn shot_info_serializes_key_as_string() {
    let key = fingerprint("https://example.com/");
    let info = ShotInfo::new(key.clone(), ShotStatus::Ready, 42);
    let json = serde_json::to_value(&info).unwrap();
    assert_eq!(json["key"], key.as_str());
    assert_eq!(json["status"], "ready");
    assert_eq!(json["last_update"], 42);
    assert!(info.is_ready());
}
