//! SHA3-256 hashing for API key secrets.

use std::fmt;

use data_encoding::{HEXLOWER, HEXLOWER_PERMISSIVE};
use sha3::{Digest, Sha3_256};
use subtle::{Choice, ConstantTimeEq};

use crate::codec;

/// Digest length in bytes.
pub const HASH_LENGTH: usize = 32;

/// One-way digest of a secret's raw bytes.
///
/// Safe to store and log. Displays as base58, the same alphabet as the
/// token itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SecretHash([u8; HASH_LENGTH]);

impl SecretHash {
    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; HASH_LENGTH] {
        &self.0
    }

    /// Lowercase hex rendering, for stores that keep hex digests.
    pub fn to_hex(&self) -> String {
        HEXLOWER.encode(&self.0)
    }

    /// Parse a base58-encoded digest. Returns `None` if the string doesn't
    /// decode to exactly [`HASH_LENGTH`] bytes.
    pub fn from_encoded(encoded: &str) -> Option<Self> {
        // 32 bytes never take more than 44 base58 chars
        if encoded.len() > 2 * HASH_LENGTH {
            return None;
        }
        let bytes = codec::decode(encoded).ok()?;
        Self::from_slice(&bytes)
    }

    /// Parse a hex digest (either case).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let bytes = HEXLOWER_PERMISSIVE.decode(hex.as_bytes()).ok()?;
        Self::from_slice(&bytes)
    }

    fn from_slice(bytes: &[u8]) -> Option<Self> {
        let digest: [u8; HASH_LENGTH] = bytes.try_into().ok()?;
        Some(Self(digest))
    }
}

impl ConstantTimeEq for SecretHash {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl fmt::Display for SecretHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::encode(&self.0))
    }
}

/// Compute the digest of a secret's raw (decoded) bytes.
pub fn compute_hash(secret: &[u8]) -> SecretHash {
    let digest = Sha3_256::digest(secret);

    let mut hash = [0u8; HASH_LENGTH];
    hash.copy_from_slice(&digest);
    SecretHash(hash)
}

/// Hash a secret's raw bytes and encode the digest as base58.
pub fn hash_secret(secret: &[u8]) -> String {
    compute_hash(secret).to_string()
}
