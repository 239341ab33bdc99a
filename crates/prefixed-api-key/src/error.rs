//! Error types for API key operations.

use thiserror::Error;

/// A string could not be decoded by the token codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Character outside the base58 alphabet, with its char index
    #[error("Invalid base58 character {character:?} at index {index}")]
    InvalidCharacter { character: char, index: usize },

    /// Any other failure reported by the base58 decoder
    #[error("Base58 decoding failed: {0}")]
    Codec(String),
}

/// Errors that can occur during API key operations.
#[derive(Debug, Error)]
pub enum ApiKeyError {
    /// Prefix is empty or contains the token delimiter
    #[error("You must provide a prefix, and it must not contain '_' characters")]
    InvalidPrefix,

    /// Secret entropy is zero, too large, or not a whole number of bytes
    #[error("Invalid secret entropy: {0} bits is not a multiple of 8 between 8 and 1024")]
    InvalidEntropy(u32),

    /// Key id length is zero or too large
    #[error("Invalid key id length: must be between 1 and 128 bytes")]
    InvalidKeyIdLength,

    /// Token doesn't have the `prefix_keyId_secret` shape, or a segment
    /// can't be decoded
    #[error("Malformed token: {reason}")]
    MalformedToken {
        reason: &'static str,
        #[source]
        source: Option<DecodeError>,
    },
}

impl ApiKeyError {
    pub(crate) fn malformed(reason: &'static str) -> Self {
        ApiKeyError::MalformedToken {
            reason,
            source: None,
        }
    }

    pub(crate) fn undecodable(reason: &'static str, source: DecodeError) -> Self {
        ApiKeyError::MalformedToken {
            reason,
            source: Some(source),
        }
    }
}

/// Result type alias for API key operations.
pub type Result<T> = std::result::Result<T, ApiKeyError>;
