// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! URL fingerprints.
//!
//! A fingerprint is `<sha256-hex>.<url-byte-length>`. It addresses a result in
//! the pool and is the key clients use to poll for status. The first four hex
//! characters pick the two-level shard directory.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use thiserror::Error;

/// Number of hex characters in the digest part of a fingerprint
pub const DIGEST_HEX_LEN: usize = 64;

/// Errors from parsing a client-supplied fingerprint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FingerprintError {
    #[error("invalid fingerprint '{0}': expected <{DIGEST_HEX_LEN} hex chars>.<length>")]
    Malformed(String),
}

/// Deterministic identifier derived from a URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Parse a fingerprint received from a client.
    ///
    /// Accepts exactly the shape produced by [`fingerprint`]: lowercase hex
    /// digest, a dot, and one or more decimal digits.
    pub fn parse(s: &str) -> Result<Self, FingerprintError> {
        let malformed = || FingerprintError::Malformed(s.to_string());
        let (digest, len) = s.split_once('.').ok_or_else(malformed)?;

        let digest_ok = digest.len() == DIGEST_HEX_LEN
            && digest.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        let len_ok = !len.is_empty() && len.bytes().all(|b| b.is_ascii_digit());

        if digest_ok && len_ok {
            Ok(Self(s.to_string()))
        } else {
            Err(malformed())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Two-level shard names: characters `[0..2]` and `[2..4]`.
    pub fn shard(&self) -> (&str, &str) {
        (&self.0[0..2], &self.0[2..4])
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = FingerprintError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Fingerprint> for String {
    fn from(fp: Fingerprint) -> Self {
        fp.0
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Compute the fingerprint of a URL.
///
/// Total over all strings; callers reject empty URLs before getting here.
pub fn fingerprint(url: &str) -> Fingerprint {
    let digest = Sha256::digest(url.as_bytes());
    Fingerprint(format!("{}.{}", hex::encode(digest), url.len()))
}

#[cfg(test)]
#[path = "fingerprint_tests.rs"]
mod tests;
