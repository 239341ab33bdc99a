//! Prefixed API key generation and validation.
//!
//! This crate provides functionality for:
//! - Generating API keys from a random key id and a random secret
//! - Parsing tokens to extract their components
//! - Verifying tokens against stored hashes using constant-time comparison
//!
//! # Token Format
//!
//! Tokens follow the format: `{prefix}_{base58(key_id)}_{base58(secret)}`
//!
//! Example: `mycompany_BRTRKFsL_51FwqftsmMDHHbJAMEXXHCgG`
//!
//! The key id is public and meant for looking up the stored record. Only
//! the SHA3-256 digest of the secret's raw bytes is stored.
//!
//! # Example
//!
//! ```rust
//! use prefixed_api_key::{ApiKeyConfig, check_api_key, extract_key_id, generate_api_key};
//!
//! // Generate a new API key
//! let config = ApiKeyConfig::new("mycompany");
//! let key = generate_api_key(&config).unwrap();
//!
//! // Give key.token to the user (only shown once!), store key.record()
//! let record = key.record();
//!
//! // Later, look up the record by key id and verify the token
//! assert_eq!(extract_key_id(&key.token).unwrap(), record.key_id);
//! assert!(check_api_key(&key.token, &record.secret_hash).unwrap());
//! ```

pub mod codec;
mod config;
mod data;
mod error;
mod hash;
mod parse;
mod token;
mod verify;

// Public re-exports
pub use config::{
    ApiKeyConfig, DEFAULT_KEY_ID_LENGTH, DEFAULT_SECRET_ENTROPY, KeyLengths, MAX_KEY_ID_LENGTH,
    MAX_SECRET_ENTROPY,
};
pub use data::{ApiKeyRecord, SecretBytes};
pub use error::{ApiKeyError, DecodeError, Result};
pub use hash::{HASH_LENGTH, SecretHash, compute_hash, hash_secret};
pub use parse::{
    ApiKeyComponents, MAX_SEGMENT_LEN, ParsedToken, extract_key_id, extract_secret,
    extract_secret_bytes, extract_secret_hash, get_api_key_components, parse_token,
};
pub use token::{DELIMITER, GeneratedApiKey, generate, generate_api_key};
pub use verify::{check_api_key, is_valid_api_key, verify_record};
