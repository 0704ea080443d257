// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job records: the flat `key=value` payload stored in the queue.
//!
//! A record's identity is its file path in the queue, not anything inside it.

use std::path::Path;
use thiserror::Error;

pub const URL: &str = "URL";
pub const TARGET_FILE: &str = "TargetFile";
pub const LOG_FILE: &str = "LogFile";
pub const USER_AGENT: &str = "UserAgent";

/// Errors from building or parsing a job record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("invalid key {0:?}: keys must be non-empty and contain no '=' or newline")]
    InvalidKey(String),

    #[error("invalid value for {0}: values must not contain a newline")]
    InvalidValue(String),

    #[error("missing required field {0}")]
    MissingField(&'static str),
}

/// Ordered string-to-string mapping.
///
/// Insertion order is preserved so the serialized form is stable. Setting an
/// existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobRecord {
    fields: Vec<(String, String)>,
}

impl JobRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the four-field record the render workers consume.
    pub fn render(url: &str, target_file: &Path, log_file: &Path, user_agent: &str) -> Self {
        let mut record = Self::new();
        record.set(URL, url);
        record.set(TARGET_FILE, target_file.to_string_lossy());
        record.set(LOG_FILE, log_file.to_string_lossy());
        record.set(USER_AGENT, user_agent);
        record
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn url(&self) -> Option<&str> {
        self.get(URL)
    }

    pub fn target_file(&self) -> Option<&str> {
        self.get(TARGET_FILE)
    }

    pub fn log_file(&self) -> Option<&str> {
        self.get(LOG_FILE)
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.get(USER_AGENT)
    }

    /// Check that every field survives a write/parse cycle.
    pub fn validate(&self) -> Result<(), RecordError> {
        for (key, value) in self.iter() {
            if key.is_empty() || key.contains(['=', '\n', '\r']) || key.starts_with('#') {
                return Err(RecordError::InvalidKey(key.to_string()));
            }
            if value.contains(['\n', '\r']) {
                return Err(RecordError::InvalidValue(key.to_string()));
            }
        }
        Ok(())
    }

    /// The URL and target file a render worker needs, or the first one missing.
    pub fn require_render_fields(&self) -> Result<(&str, &str), RecordError> {
        let url = self.url().ok_or(RecordError::MissingField(URL))?;
        let target_file = self.target_file().ok_or(RecordError::MissingField(TARGET_FILE))?;
        Ok((url, target_file))
    }

    /// Serialized lines, one `key=value\n` per field.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.iter().map(|(k, v)| format!("{k}={v}\n"))
    }

    /// Parse the text form.
    ///
    /// Blank lines and `#` comments are skipped, lines without `=` are
    /// ignored, and a value wrapped in double quotes has them removed.
    pub fn parse(text: &str) -> Self {
        text.lines()
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| {
                (key, value.strip_prefix('"').and_then(|v| v.strip_suffix('"')).unwrap_or(value))
            })
            .collect()
    }
}

impl std::fmt::Display for JobRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in self.lines() {
            f.write_str(&line)?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for JobRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (k, v) in iter {
            record.set(k, v);
        }
        record
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
