// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use std::path::PathBuf;

fn sample() -> JobRecord {
    JobRecord::render(
        "https://example.com/",
        &PathBuf::from("/pool/0f/11/fp.png"),
        &PathBuf::from("/pool/0f/11/fp.log"),
        "test-agent",
    )
}

#[test]
fn render_record_has_four_fields_in_order() {
    let record = sample();
    let keys: Vec<_> = record.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec![URL, TARGET_FILE, LOG_FILE, USER_AGENT]);
    assert_eq!(record.url(), Some("https://example.com/"));
    assert_eq!(record.target_file(), Some("/pool/0f/11/fp.png"));
    assert_eq!(record.log_file(), Some("/pool/0f/11/fp.log"));
    assert_eq!(record.user_agent(), Some("test-agent"));
}

#[test]
fn display_writes_key_value_lines() {
    let record: JobRecord = [("A", "1"), ("B", "two")].into_iter().collect();
    assert_eq!(record.to_string(), "A=1\nB=two\n");
}

#[test]
fn set_replaces_existing_key_in_place() {
    let mut record: JobRecord = [("A", "1"), ("B", "2")].into_iter().collect();
    record.set("A", "3");
    assert_eq!(record.to_string(), "A=3\nB=2\n");
    assert_eq!(record.len(), 2);
}

#[test]
fn value_may_contain_equals_sign() {
    let mut record = JobRecord::new();
    record.set(URL, "https://example.com/?a=b&c=d");
    let parsed = JobRecord::parse(&record.to_string());
    assert_eq!(parsed.url(), Some("https://example.com/?a=b&c=d"));
}

#[yare::parameterized(
    blank_lines      = { "\nA=1\n\n",          &[("A", "1")] },
    comment_skipped  = { "# note\nA=1\n",      &[("A", "1")] },
    no_equals        = { "garbage\nA=1\n",     &[("A", "1")] },
    empty_value      = { "A=\n",               &[("A", "")] },
    quoted_value     = { "A=\"hello world\"\n", &[("A", "hello world")] },
    lone_quote       = { "A=\"\n",             &[("A", "\"")] },
    half_quoted      = { "A=\"open\n",         &[("A", "\"open")] },
    crlf             = { "A=1\r\nB=2\r\n",     &[("A", "1"), ("B", "2")] },
    last_wins        = { "A=1\nA=2\n",         &[("A", "2")] },
    no_trailing_nl   = { "A=1",                &[("A", "1")] },
)]
fn parse_cases(input: &str, expected: &[(&str, &str)]) {
    let parsed = JobRecord::parse(input);
    let got: Vec<_> = parsed.iter().collect();
    assert_eq!(got, expected.to_vec());
}

#[yare::parameterized(
    empty_key     = { "",      "v",    false },
    key_equals    = { "a=b",   "v",    false },
    key_newline   = { "a\nb",  "v",    false },
    key_comment   = { "#a",    "v",    false },
    value_newline = { "a",     "x\ny", false },
    value_cr      = { "a",     "x\ry", false },
    plain         = { "a",     "x=y",  true },
)]
fn validate_cases(key: &str, value: &str, ok: bool) {
    let mut record = JobRecord::new();
    record.set(key, value);
    assert_eq!(record.validate().is_ok(), ok);
}

#[test]
fn require_render_fields_reports_missing_url() {
    let record: JobRecord = [(TARGET_FILE, "/x.png")].into_iter().collect();
    assert_eq!(record.require_render_fields(), Err(RecordError::MissingField(URL)));
}

#[test]
fn require_render_fields_reports_missing_target() {
    let record: JobRecord = [(URL, "https://x/")].into_iter().collect();
    assert_eq!(record.require_render_fields(), Err(RecordError::MissingField(TARGET_FILE)));
}

#[test]
fn require_render_fields_accepts_full_record() {
    let record = sample();
    let (url, target) = record.require_render_fields().unwrap();
    assert_eq!(url, "https://example.com/");
    assert_eq!(target, record.target_file().unwrap());
}

proptest! {
    #[test]
    fn valid_records_survive_text_form(
        pairs in proptest::collection::vec(("[A-Za-z][A-Za-z0-9_]{0,8}", "[^\r\n\"]{0,32}"), 0..6)
    ) {
        let record: JobRecord = pairs.into_iter().collect();
        prop_assume!(record.validate().is_ok());
        prop_assert_eq!(JobRecord::parse(&record.to_string()), record);
    }
}
