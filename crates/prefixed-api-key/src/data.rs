//! Data types for API key storage and handling.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Data to store in database for an API key.
///
/// The actual secret is never stored - only the hash. Index by `key_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyRecord {
    /// Public lookup value, as it appears in the token.
    pub key_id: String,
    /// Base58-encoded SHA3-256 digest of the secret's raw bytes.
    pub secret_hash: String,
}

impl ApiKeyRecord {
    /// Create new API key record.
    pub fn new(key_id: impl Into<String>, secret_hash: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            secret_hash: secret_hash.into(),
        }
    }
}

/// Raw secret bytes. Cleared from memory when dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretBytes(Vec<u8>);

impl SecretBytes {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Borrow the raw bytes.
    pub fn expose(&self) -> &[u8] {
        &self.0
    }

    /// Number of raw secret bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no secret bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBytes([REDACTED; {}])", self.0.len())
    }
}
