//! Token verification with constant-time comparison.

use subtle::ConstantTimeEq;

use crate::config::DEFAULT_SECRET_ENTROPY;
use crate::data::ApiKeyRecord;
use crate::error::Result;
use crate::hash::{SecretHash, compute_hash};
use crate::parse::parse_token;

// Hashed in place of the secret when the token can't be parsed, so a
// malformed token still pays for the hash and comparison. Splitting and
// decoding stop at the first fault and are not padded.
const PLACEHOLDER_SECRET: [u8; (DEFAULT_SECRET_ENTROPY / 8) as usize] =
    [0u8; (DEFAULT_SECRET_ENTROPY / 8) as usize];

/// Verify a token against a stored secret hash.
///
/// This function:
/// 1. Parses the token and decodes its secret to raw bytes
/// 2. Hashes the raw bytes the same way generation does
/// 3. Compares the digest against the decoded stored hash in constant time
///
/// # Returns
/// * `Ok(true)` if the token's secret matches
/// * `Ok(false)` if it doesn't, or `expected_secret_hash` is not a valid digest
/// * `Err(MalformedToken)` if the token can't be parsed, including a key
///   id or secret longer than [`MAX_SEGMENT_LEN`](crate::MAX_SEGMENT_LEN).
///   The hash and comparison still run first; parsing and decoding do not
///   take the same time on both paths.
pub fn check_api_key(token: &str, expected_secret_hash: &str) -> Result<bool> {
    let expected = SecretHash::from_encoded(expected_secret_hash);

    let parsed = parse_token(token).and_then(|parsed| {
        let secret = parsed.secret_bytes()?;
        Ok((parsed.key_id, secret))
    });

    let computed = match &parsed {
        Ok((_, secret)) => compute_hash(secret.expose()),
        Err(_) => compute_hash(&PLACEHOLDER_SECRET),
    };
    let matched = hashes_equal(&computed, expected.as_ref());

    match parsed {
        Ok((key_id, _)) => {
            log::debug!(
                "API key {} verification {}",
                key_id,
                if matched { "succeeded" } else { "failed" }
            );
            Ok(matched)
        }
        Err(e) => {
            log::debug!("Rejected malformed API key: {}", e);
            Err(e)
        }
    }
}

/// Verify a token against a stored record.
///
/// The token's key id must equal the record's before the secret is
/// checked. Key ids are public, so that comparison is not constant-time.
pub fn verify_record(token: &str, record: &ApiKeyRecord) -> Result<bool> {
    let key_id = parse_token(token)?.key_id;
    if key_id != record.key_id {
        log::debug!(
            "API key {} presented against record {}",
            key_id,
            record.key_id
        );
        return Ok(false);
    }

    check_api_key(token, &record.secret_hash)
}

/// Verify a token, treating every failure as a mismatch.
pub fn is_valid_api_key(token: &str, expected_secret_hash: &str) -> bool {
    check_api_key(token, expected_secret_hash).unwrap_or(false)
}

/// Constant-time comparison of two hashes.
fn hashes_equal(computed: &SecretHash, expected: Option<&SecretHash>) -> bool {
    match expected {
        Some(expected) => computed.ct_eq(expected).into(),
        None => false,
    }
}
