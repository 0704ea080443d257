// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use sj_core::FakeClock;
use std::fs;
use std::time::Duration;
use tempfile::{tempdir, TempDir};

struct Fixture {
    _dir: TempDir,
    queue: JobQueue,
    pool: ResultPool,
    clock: FakeClock,
    submitter: Submitter<FakeClock>,
}

fn fixture() -> Fixture {
    let dir = tempdir().unwrap();
    let queue = JobQueue::open(dir.path().join("queue")).unwrap();
    let pool = ResultPool::open(dir.path().join("pool")).unwrap();
    let clock = FakeClock::new();
    clock.set_epoch_ms(1_700_000_000_000);
    let submitter = Submitter::with_clock(queue.clone(), pool.clone(), clock.clone());
    Fixture { _dir: dir, queue, pool, clock, submitter }
}

fn pending_records(queue: &JobQueue) -> Vec<JobRecord> {
    queue.list_pending().unwrap().map(|p| queue.read_job(&p).unwrap()).collect()
}

#[test]
fn submit_new_url_enqueues_and_reports_running() {
    let f = fixture();
    let url = "https://example.com/";

    let info = f.submitter.submit(url, "test-agent").unwrap();

    let key = fingerprint(url);
    assert_eq!(info, ShotInfo::new(key.clone(), ShotStatus::Running, 0));

    let records = pending_records(&f.queue);
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.url(), Some(url));
    assert_eq!(record.target_file(), f.pool.image_path(&key).to_str());
    assert_eq!(record.log_file(), f.pool.log_path(&key).to_str());
    assert_eq!(record.user_agent(), Some("test-agent"));
}

#[test]
fn submit_appends_timestamped_log_line() {
    let f = fixture();
    let url = "https://example.com/";

    f.submitter.submit(url, "ua").unwrap();
    f.clock.advance(Duration::from_secs(5));
    f.submitter.submit(url, "ua").unwrap();

    let log = fs::read_to_string(f.pool.log_path(&fingerprint(url))).unwrap();
    assert_eq!(log, "1700000000\thttps://example.com/\n1700000005\thttps://example.com/\n");
    assert_eq!(f.submitter.lookup(fingerprint(url).as_str()).unwrap().status, ShotStatus::Running);
}

#[test]
fn submit_running_url_enqueues_again() {
    let f = fixture();
    f.submitter.submit("https://example.com/", "ua").unwrap();
    f.submitter.submit("https://example.com/", "ua").unwrap();
    assert_eq!(f.queue.counts().unwrap().pending, 2);
}

#[test]
fn submit_ready_url_returns_status_without_enqueuing() {
    let f = fixture();
    let url = "https://example.com/";
    let key = fingerprint(url);
    fs::create_dir_all(f.pool.locate(&key)).unwrap();
    fs::write(f.pool.image_path(&key), b"\x89PNG").unwrap();

    let info = f.submitter.submit(url, "ua").unwrap();

    assert_eq!(info.status, ShotStatus::Ready);
    assert!(info.last_update > 0);
    assert_eq!(f.queue.counts().unwrap().pending, 0);
    assert!(!f.pool.log_path(&key).exists());
}

#[yare::parameterized(
    empty_url      = { "",            "ua" },
    blank_url      = { "   ",         "ua" },
    empty_agent    = { "https://x/",  "" },
    not_a_url      = { "not-a-url",   "ua" },
    ftp_scheme     = { "ftp://x/",    "ua" },
    embedded_http  = { "foo http://x", "ua" },
    newline_url    = { "https://example.com/\nx", "ua" },
    newline_agent  = { "https://x/",  "ua\nURL=https://y/" },
)]
fn submit_rejects_before_any_write(url: &str, user_agent: &str) {
    let f = fixture();

    assert!(f.submitter.submit(url, user_agent).is_err());

    assert_eq!(f.queue.counts().unwrap().pending, 0);
    assert_eq!(fs::read_dir(f.pool.root()).unwrap().count(), 0);
}

#[test]
fn submit_error_variants() {
    let f = fixture();
    assert!(matches!(f.submitter.submit("", "ua"), Err(SubmitError::EmptyUrl)));
    assert!(matches!(f.submitter.submit("https://x/", " "), Err(SubmitError::EmptyUserAgent)));
    assert!(matches!(f.submitter.submit("not-a-url", "ua"), Err(SubmitError::InvalidUrl(_))));
}

#[test]
fn rejected_submission_leaves_key_unknown() {
    let f = fixture();
    let url = "https://example.com/\nx";

    let err = f.submitter.submit(url, "ua").unwrap_err();

    assert!(matches!(err, SubmitError::InvalidUrl(UrlError::ControlChar)));
    let key = fingerprint(url);
    assert!(!f.pool.log_path(&key).exists());
    assert_eq!(f.submitter.lookup(key.as_str()).unwrap().status, ShotStatus::NotExists);

    let err = f.submitter.submit("https://example.com/", "ua\r\nURL=x").unwrap_err();
    assert!(matches!(err, SubmitError::Queue(QueueError::InvalidRecord(_))));
    let key = fingerprint("https://example.com/");
    assert_eq!(f.submitter.lookup(key.as_str()).unwrap().status, ShotStatus::NotExists);
    assert_eq!(f.queue.counts().unwrap().pending, 0);
}

#[test]
fn submit_reports_queue_failure() {
    let dir = tempdir().unwrap();
    // queue directories never created
    let queue = JobQueue::at(dir.path().join("queue"));
    let pool = ResultPool::open(dir.path().join("pool")).unwrap();
    let submitter = Submitter::new(queue, pool);

    let err = submitter.submit("https://example.com/", "ua").unwrap_err();
    assert!(matches!(err, SubmitError::Queue(_)));
}

#[test]
fn submit_reports_log_failure() {
    let dir = tempdir().unwrap();
    let queue = JobQueue::open(dir.path().join("queue")).unwrap();
    let blocker = dir.path().join("pool");
    fs::write(&blocker, "not a directory").unwrap();
    let submitter = Submitter::new(queue.clone(), ResultPool::new(&blocker));

    let err = submitter.submit("https://example.com/", "ua").unwrap_err();

    assert!(matches!(err, SubmitError::Log(_)));
    assert_eq!(queue.counts().unwrap().pending, 0);
}

#[test]
fn lookup_unknown_key_is_not_exists() {
    let f = fixture();
    let key = fingerprint("https://never-submitted.example/");
    let info = f.submitter.lookup(key.as_str()).unwrap();
    assert_eq!(info, ShotInfo::new(key, ShotStatus::NotExists, 0));
}

#[yare::parameterized(
    empty       = { "" },
    no_length   = { "0f115db062b7c0dd030b16878c99dea5c354b49dc37b38eb8846179c7783e9d7" },
    short       = { "abc.20" },
    traversal   = { "../../etc/passwd" },
)]
fn lookup_rejects_malformed_keys(key: &str) {
    let f = fixture();
    assert!(matches!(f.submitter.lookup(key), Err(LookupError::InvalidKey(_))));
    assert!(f.submitter.image(key).is_err());
}

#[test]
fn image_is_only_returned_when_ready() {
    let f = fixture();
    let url = "https://example.com/";
    let key = fingerprint(url);

    assert_eq!(f.submitter.image(key.as_str()).unwrap(), None);
    f.submitter.submit(url, "ua").unwrap();
    assert_eq!(f.submitter.image(key.as_str()).unwrap(), None);

    fs::write(f.pool.image_path(&key), b"\x89PNG").unwrap();
    assert_eq!(f.submitter.image(key.as_str()).unwrap(), Some(f.pool.image_path(&key)));
}
