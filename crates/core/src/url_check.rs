// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Submission URL validation.
//!
//! Only absolute `http`/`https` URLs with a host are accepted. A URL that
//! merely contains `http://` somewhere (e.g. `foo http://x`) is rejected.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("url is empty")]
    Empty,

    #[error("url contains control characters")]
    ControlChar,

    #[error("url does not parse: {0}")]
    Parse(String),

    #[error("unsupported scheme '{0}': only http and https are accepted")]
    Scheme(String),

    #[error("url has no host")]
    NoHost,
}

pub fn validate_url(raw: &str) -> Result<url::Url, UrlError> {
    if raw.trim().is_empty() {
        return Err(UrlError::Empty);
    }
    // The parser strips tabs and newlines, so check the raw text.
    if raw.chars().any(char::is_control) {
        return Err(UrlError::ControlChar);
    }
    let parsed = url::Url::parse(raw).map_err(|e| UrlError::Parse(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(UrlError::Scheme(other.to_string())),
    }
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(parsed),
        _ => Err(UrlError::NoHost),
    }
}

#[cfg(test)]
#[path = "url_check_tests.rs"]
mod tests;
