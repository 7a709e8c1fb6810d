//! Content fingerprints using BLAKE3 hashing
//!
//! A fingerprint identifies one exact rendering of a piece of content. The
//! renderer uses it to tell whether a render changed what is mounted, and it
//! doubles as an HTTP entity tag for callers that cache rendered previews.
//!
//! # Algorithm
//!
//! 1. Hash the bytes using BLAKE3
//! 2. Take the first 128 bits (16 bytes) of the hash
//! 3. Encode as lowercase hexadecimal
//!
//! The ETag forms follow RFC 9110: strong `"<hex>"` and weak `W/"<hex>"`.
//!
//! # Example
//!
//! ```
//! use zemon_content::fingerprint::Fingerprint;
//!
//! let fingerprint = Fingerprint::of(b"<p>Hello</p>");
//! let etag = fingerprint.etag();
//! assert!(etag.starts_with('"') && etag.ends_with('"'));
//! assert_eq!(etag.len(), 34); // 32 hex chars + 2 quotes
//! assert_eq!(fingerprint, Fingerprint::of(b"<p>Hello</p>"));
//! ```

use std::fmt;

/// Number of hash bytes kept
const FINGERPRINT_LEN: usize = 16;

/// Truncated BLAKE3 digest of some content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; FINGERPRINT_LEN]);

impl Fingerprint {
    /// Fingerprint the given bytes
    pub fn of(bytes: &[u8]) -> Self {
        let hash = blake3::hash(bytes);
        let mut truncated = [0u8; FINGERPRINT_LEN];
        truncated.copy_from_slice(&hash.as_bytes()[..FINGERPRINT_LEN]);
        Self(truncated)
    }

    /// Lowercase hex digest
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Strong entity tag (`"..."`)
    pub fn etag(&self) -> String {
        format!("\"{}\"", self.to_hex())
    }

    /// Weak entity tag (`W/"..."`)
    ///
    /// Weak tags assert semantic equivalence rather than byte identity.
    pub fn weak_etag(&self) -> String {
        format!("W/{}", self.etag())
    }

    /// Whether an `If-None-Match` style tag refers to this fingerprint
    ///
    /// Uses weak comparison: a `W/` prefix on either side is ignored.
    pub fn matches_etag(&self, tag: &str) -> bool {
        let tag = tag.trim();
        let tag = tag.strip_prefix("W/").unwrap_or(tag);
        tag == self.etag()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
