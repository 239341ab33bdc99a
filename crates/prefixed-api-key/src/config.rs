//! Configuration for API key generation.

use serde::Deserialize;

use crate::error::{ApiKeyError, Result};
use crate::token::DELIMITER;

/// Default key id length in bytes.
pub const DEFAULT_KEY_ID_LENGTH: usize = 8;

/// Default secret entropy in bits.
pub const DEFAULT_SECRET_ENTROPY: u32 = 128;

/// Largest accepted key id length in bytes. Encodes to at most 176 chars.
pub const MAX_KEY_ID_LENGTH: usize = 128;

/// Largest accepted secret entropy in bits (128 bytes).
pub const MAX_SECRET_ENTROPY: u32 = 1024;

/// Configuration for API key generation.
///
/// Passed per call; there is no process-wide default. Can be loaded from
/// a config file, in which case unknown fields are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiKeyConfig {
    /// Prefix for token strings (e.g., "mycompany" produces "mycompany_...").
    pub prefix: String,
    /// Length of the random key id, in bytes.
    #[serde(default = "default_key_id_length")]
    pub key_id_length: usize,
    /// Entropy of the secret, in bits. Must be a multiple of 8.
    #[serde(default = "default_secret_entropy")]
    pub secret_entropy: u32,
}

fn default_key_id_length() -> usize {
    DEFAULT_KEY_ID_LENGTH
}

fn default_secret_entropy() -> u32 {
    DEFAULT_SECRET_ENTROPY
}

/// Byte lengths of the two random draws, derived from a validated config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyLengths {
    pub key_id: usize,
    pub secret: usize,
}

impl ApiKeyConfig {
    /// Create a new config with the given prefix and default lengths.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            key_id_length: DEFAULT_KEY_ID_LENGTH,
            secret_entropy: DEFAULT_SECRET_ENTROPY,
        }
    }

    /// Set the key id length in bytes.
    pub fn with_key_id_length(mut self, bytes: usize) -> Self {
        self.key_id_length = bytes;
        self
    }

    /// Set the secret entropy in bits.
    pub fn with_secret_entropy(mut self, bits: u32) -> Self {
        self.secret_entropy = bits;
        self
    }

    /// Check the config and convert it to byte lengths.
    pub fn validate(&self) -> Result<KeyLengths> {
        if self.prefix.is_empty() || self.prefix.contains(DELIMITER) {
            return Err(ApiKeyError::InvalidPrefix);
        }
        if self.secret_entropy == 0
            || self.secret_entropy % 8 != 0
            || self.secret_entropy > MAX_SECRET_ENTROPY
        {
            return Err(ApiKeyError::InvalidEntropy(self.secret_entropy));
        }
        if self.key_id_length == 0 || self.key_id_length > MAX_KEY_ID_LENGTH {
            return Err(ApiKeyError::InvalidKeyIdLength);
        }

        Ok(KeyLengths {
            key_id: self.key_id_length,
            secret: (self.secret_entropy / 8) as usize,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let config = ApiKeyConfig::new("mycompany");
        assert_eq!(config.prefix, "mycompany");
        assert_eq!(config.key_id_length, 8);
        assert_eq!(config.secret_entropy, 128);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ApiKeyConfig::new("lb")
            .with_key_id_length(10)
            .with_secret_entropy(160);
        assert_eq!(
            config.validate().unwrap(),
            KeyLengths {
                key_id: 10,
                secret: 20
            }
        );
    }

    #[test]
    fn test_rejects_bad_prefix() {
        for prefix in ["", "a_b", "_", "trailing_"] {
            let result = ApiKeyConfig::new(prefix).validate();
            assert!(matches!(result, Err(ApiKeyError::InvalidPrefix)), "{prefix:?}");
        }
    }

    #[test]
    fn test_rejects_unaligned_entropy() {
        let result = ApiKeyConfig::new("a").with_secret_entropy(127).validate();
        assert!(matches!(result, Err(ApiKeyError::InvalidEntropy(127))));

        let result = ApiKeyConfig::new("a").with_secret_entropy(0).validate();
        assert!(matches!(result, Err(ApiKeyError::InvalidEntropy(0))));
    }

    #[test]
    fn test_rejects_zero_key_id_length() {
        let result = ApiKeyConfig::new("a").with_key_id_length(0).validate();
        assert!(matches!(result, Err(ApiKeyError::InvalidKeyIdLength)));
    }

    #[test]
    fn test_rejects_oversized_lengths() {
        let result = ApiKeyConfig::new("a")
            .with_key_id_length(MAX_KEY_ID_LENGTH + 1)
            .validate();
        assert!(matches!(result, Err(ApiKeyError::InvalidKeyIdLength)));

        let result = ApiKeyConfig::new("a")
            .with_secret_entropy(MAX_SECRET_ENTROPY + 8)
            .validate();
        assert!(matches!(result, Err(ApiKeyError::InvalidEntropy(1032))));

        let lengths = ApiKeyConfig::new("a")
            .with_key_id_length(MAX_KEY_ID_LENGTH)
            .with_secret_entropy(MAX_SECRET_ENTROPY)
            .validate()
            .unwrap();
        assert_eq!(lengths, KeyLengths { key_id: 128, secret: 128 });
    }

    #[test]
    fn test_prefix_checked_before_entropy() {
        let result = ApiKeyConfig::new("a_b").with_secret_entropy(7).validate();
        assert!(matches!(result, Err(ApiKeyError::InvalidPrefix)));
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
prefix: mycompany
secret_entropy: 256
"#;
        let config: ApiKeyConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.prefix, "mycompany");
        assert_eq!(config.key_id_length, DEFAULT_KEY_ID_LENGTH);
        assert_eq!(config.secret_entropy, 256);
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let yaml = r#"
prefix: mycompany
key_id_entropy: 64
"#;
        let result: std::result::Result<ApiKeyConfig, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_requires_prefix() {
        let result: std::result::Result<ApiKeyConfig, _> =
            serde_json::from_str(r#"{"key_id_length": 4}"#);
        assert!(result.is_err());
    }
}
