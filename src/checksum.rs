//! Integrity checksums for exported ontology documents
//!
//! An exported document carries a SHA256 digest of its own body so a
//! re-import can tell whether the file was edited or truncated outside the
//! editor.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Hex-encoded SHA256 digest of a document body
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checksum(String);

impl Checksum {
    /// Digest raw bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        Self(format!("{:x}", hash))
    }

    /// Digest a JSON value via its compact encoding
    pub fn from_json(value: &serde_json::Value) -> Self {
        let encoded = serde_json::to_string(value).unwrap_or_default();
        Self::from_bytes(encoded.as_bytes())
    }

    /// The hex digest string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the JSON value hashes to this digest
    pub fn verify_json(&self, value: &serde_json::Value) -> bool {
        *self == Self::from_json(value)
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Checksum {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Checksum {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
