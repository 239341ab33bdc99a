//! Base58 codec for key ids, secrets and secret hashes.
//!
//! Uses the Bitcoin alphabet, which has no `_`, so encoded values can be
//! joined with the token delimiter without escaping.

use crate::error::DecodeError;

/// The Bitcoin base58 alphabet.
pub const ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Encode raw bytes as base58.
///
/// Each leading zero byte is rendered as a leading `1`.
pub fn encode(bytes: &[u8]) -> String {
    bs58::encode(bytes)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_string()
}

/// Check that every character is in the alphabet, without decoding.
pub fn validate(encoded: &str) -> Result<(), DecodeError> {
    match encoded
        .chars()
        .enumerate()
        .find(|(_, c)| !ALPHABET.contains(*c))
    {
        Some((index, character)) => Err(DecodeError::InvalidCharacter { character, index }),
        None => Ok(()),
    }
}

/// Decode a base58 string back to raw bytes.
///
/// Cost grows with the square of the input length; bound untrusted input
/// before calling this.
pub fn decode(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    bs58::decode(encoded)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| decode_error(encoded, e))
}

// bs58 reports byte offsets. Everything before the first bad byte is ASCII,
// so a byte offset there is also the char index.
fn decode_error(encoded: &str, err: bs58::decode::Error) -> DecodeError {
    match err {
        bs58::decode::Error::InvalidCharacter { character, index } => {
            DecodeError::InvalidCharacter { character, index }
        }
        bs58::decode::Error::NonAsciiCharacter { index } => {
            match encoded.get(index..).and_then(|rest| rest.chars().next()) {
                Some(character) => DecodeError::InvalidCharacter { character, index },
                None => DecodeError::Codec(err.to_string()),
            }
        }
        other => DecodeError::Codec(other.to_string()),
    }
}
