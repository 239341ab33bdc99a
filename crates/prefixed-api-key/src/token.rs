//! Token generation for API keys.

use std::fmt;

use rand::RngCore;
use serde::Serialize;

use crate::codec;
use crate::config::ApiKeyConfig;
use crate::data::{ApiKeyRecord, SecretBytes};
use crate::error::Result;
use crate::hash::hash_secret;

/// Separates prefix, key id and secret in a token.
pub const DELIMITER: char = '_';

/// A freshly generated API key.
///
/// `token` is given to the client once; `record()` is what gets stored.
#[derive(Clone, Serialize)]
pub struct GeneratedApiKey {
    /// Base58-encoded key id (public lookup value).
    pub key_id: String,
    /// Base58-encoded secret, as it appears in the token.
    #[serde(skip)]
    pub secret: String,
    /// Base58-encoded digest of the raw secret bytes.
    pub secret_hash: String,
    /// The full token string: `prefix_keyId_secret`.
    pub token: String,
    /// Raw secret bytes, zeroized on drop.
    #[serde(skip)]
    pub secret_bytes: SecretBytes,
}

impl fmt::Debug for GeneratedApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedApiKey")
            .field("key_id", &self.key_id)
            .field("secret", &"[REDACTED]")
            .field("secret_hash", &self.secret_hash)
            .field("token", &"[REDACTED]")
            .field("secret_bytes", &self.secret_bytes)
            .finish()
    }
}

impl GeneratedApiKey {
    /// The tuple to persist for later verification.
    pub fn record(&self) -> ApiKeyRecord {
        ApiKeyRecord::new(self.key_id.clone(), self.secret_hash.clone())
    }
}

/// Generate a new API key token string.
pub fn generate(config: &ApiKeyConfig) -> Result<String> {
    generate_api_key(config).map(|key| key.token)
}

/// Generate a new API key and return the token together with its
/// storage data.
///
/// The config is validated before any randomness is drawn. Key id and
/// secret come from two separate draws on the OS random source.
pub fn generate_api_key(config: &ApiKeyConfig) -> Result<GeneratedApiKey> {
    let lengths = config.validate()?;

    let key_id_bytes = random_bytes(lengths.key_id);
    let secret_bytes = SecretBytes::new(random_bytes(lengths.secret));

    let key_id = codec::encode(&key_id_bytes);
    let secret = codec::encode(secret_bytes.expose());
    let token = format!("{}{DELIMITER}{key_id}{DELIMITER}{secret}", config.prefix);

    // Hash the raw bytes, not the encoded string
    let secret_hash = hash_secret(secret_bytes.expose());

    log::debug!(
        "Generated API key {} ({} byte key id, {} bit secret)",
        key_id,
        lengths.key_id,
        config.secret_entropy
    );

    Ok(GeneratedApiKey {
        key_id,
        secret,
        secret_hash,
        token,
        secret_bytes,
    })
}

fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    bytes
}
