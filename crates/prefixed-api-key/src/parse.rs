//! Token parsing for API keys.

use std::fmt;

use serde::Serialize;

use crate::codec;
use crate::data::SecretBytes;
use crate::error::{ApiKeyError, Result};
use crate::hash::hash_secret;
use crate::token::DELIMITER;

/// Longest key id or secret segment accepted, in characters.
///
/// Base58 decoding is quadratic, so oversized segments are refused before
/// any decoding. Every key the generator can produce fits.
pub const MAX_SEGMENT_LEN: usize = 256;

/// Parsed components from a token string.
pub struct ParsedToken<'a> {
    /// The prefix, returned as-is.
    pub prefix: &'a str,
    /// The base58-encoded key id.
    pub key_id: &'a str,
    /// The base58-encoded secret.
    pub secret: &'a str,
}

impl fmt::Debug for ParsedToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedToken")
            .field("prefix", &self.prefix)
            .field("key_id", &self.key_id)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl ParsedToken<'_> {
    /// Decode the secret segment to its raw bytes.
    pub fn secret_bytes(&self) -> Result<SecretBytes> {
        codec::decode(self.secret)
            .map(SecretBytes::new)
            .map_err(|e| ApiKeyError::undecodable("secret is not valid base58", e))
    }
}

/// Parse a token string into its components.
///
/// The token must split on `_` into exactly three non-empty segments, the
/// key id and secret must be at most [`MAX_SEGMENT_LEN`] characters, and
/// the key id must only use base58 characters. The secret segment is
/// decoded lazily by [`ParsedToken::secret_bytes`].
pub fn parse_token(token: &str) -> Result<ParsedToken<'_>> {
    let mut parts = token.split(DELIMITER);
    let (Some(prefix), Some(key_id), Some(secret), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ApiKeyError::malformed("expected prefix_keyId_secret"));
    };

    if prefix.is_empty() || key_id.is_empty() || secret.is_empty() {
        return Err(ApiKeyError::malformed("empty segment"));
    }

    if key_id.len() > MAX_SEGMENT_LEN || secret.len() > MAX_SEGMENT_LEN {
        return Err(ApiKeyError::malformed("segment too long"));
    }

    if let Err(e) = codec::validate(key_id) {
        return Err(ApiKeyError::undecodable("key id is not valid base58", e));
    }

    Ok(ParsedToken {
        prefix,
        key_id,
        secret,
    })
}

/// Extract the key id, e.g. to look up the stored record.
pub fn extract_key_id(token: &str) -> Result<&str> {
    parse_token(token).map(|parsed| parsed.key_id)
}

/// Extract the encoded secret.
pub fn extract_secret(token: &str) -> Result<&str> {
    parse_token(token).map(|parsed| parsed.secret)
}

/// Extract and decode the secret's raw bytes.
pub fn extract_secret_bytes(token: &str) -> Result<SecretBytes> {
    parse_token(token)?.secret_bytes()
}

/// Recompute the secret hash carried by a token.
pub fn extract_secret_hash(token: &str) -> Result<String> {
    let secret = extract_secret_bytes(token)?;
    Ok(hash_secret(secret.expose()))
}

/// Everything derivable from a token, minus the raw secret bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiKeyComponents {
    pub key_id: String,
    pub secret: String,
    pub secret_hash: String,
    pub token: String,
}

/// Split a token and compute its secret hash in one go.
pub fn get_api_key_components(token: &str) -> Result<ApiKeyComponents> {
    let parsed = parse_token(token)?;
    let secret_bytes = parsed.secret_bytes()?;

    Ok(ApiKeyComponents {
        key_id: parsed.key_id.to_string(),
        secret: parsed.secret.to_string(),
        secret_hash: hash_secret(secret_bytes.expose()),
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiKeyConfig, MAX_KEY_ID_LENGTH, MAX_SECRET_ENTROPY};
    use crate::error::DecodeError;
    use crate::token::generate_api_key;

    const TOKEN: &str = "mycompany_BRTRKFsL_51FwqftsmMDHHbJAMEXXHCgG";

    fn assert_malformed<T: std::fmt::Debug>(result: Result<T>) {
        assert!(
            matches!(result, Err(ApiKeyError::MalformedToken { .. })),
            "expected MalformedToken, got {:?}",
            result
        );
    }

    #[test]
    fn test_parse_known_token() {
        let parsed = parse_token(TOKEN).unwrap();
        assert_eq!(parsed.prefix, "mycompany");
        assert_eq!(parsed.key_id, "BRTRKFsL");
        assert_eq!(parsed.secret, "51FwqftsmMDHHbJAMEXXHCgG");
        assert_eq!(parsed.secret_bytes().unwrap().len(), 18);
    }

    #[test]
    fn test_extract_projections() {
        assert_eq!(extract_key_id(TOKEN).unwrap(), "BRTRKFsL");
        assert_eq!(extract_secret(TOKEN).unwrap(), "51FwqftsmMDHHbJAMEXXHCgG");
        assert_eq!(
            extract_secret_hash(TOKEN).unwrap(),
            "HbYKeyApsp5yzGAJ1jCNyimRpbFTv7UzGTgVZ5s4mXZv"
        );
    }

    #[test]
    fn test_get_api_key_components() {
        let components = get_api_key_components(TOKEN).unwrap();
        assert_eq!(
            components,
            ApiKeyComponents {
                key_id: "BRTRKFsL".to_string(),
                secret: "51FwqftsmMDHHbJAMEXXHCgG".to_string(),
                secret_hash: "HbYKeyApsp5yzGAJ1jCNyimRpbFTv7UzGTgVZ5s4mXZv".to_string(),
                token: TOKEN.to_string(),
            }
        );
    }

    #[test]
    fn test_parse_generated_token() {
        let key = generate_api_key(&ApiKeyConfig::new("lb")).unwrap();
        let parsed = parse_token(&key.token).unwrap();
        assert_eq!(parsed.prefix, "lb");
        assert_eq!(parsed.key_id, key.key_id);
        assert_eq!(parsed.secret_bytes().unwrap(), key.secret_bytes);
    }

    #[test]
    fn test_wrong_segment_count() {
        assert_malformed(extract_key_id("nodelimiters"));
        assert_malformed(parse_token("a_b"));
        assert_malformed(parse_token("a_b_c_d"));
        assert_malformed(parse_token(""));
    }

    #[test]
    fn test_empty_segments() {
        assert_malformed(parse_token("_BRTRKFsL_51Fwq"));
        assert_malformed(parse_token("mycompany__51Fwq"));
        assert_malformed(parse_token("mycompany_BRTRKFsL_"));
        assert_malformed(parse_token("__"));
    }

    #[test]
    fn test_undecodable_segments() {
        assert_malformed(parse_token("mycompany_BR0TRK_51Fwq"));
        assert_malformed(extract_secret_bytes("mycompany_BRTRKFsL_51Fw0O"));

        match extract_secret_bytes("mycompany_BRTRKFsL_51Fwl") {
            Err(ApiKeyError::MalformedToken { source, .. }) => {
                assert_eq!(
                    source,
                    Some(DecodeError::InvalidCharacter {
                        character: 'l',
                        index: 4
                    })
                );
            }
            other => panic!("expected MalformedToken, got {:?}", other),
        }
    }

    #[test]
    fn test_oversized_secret_rejected() {
        let token = format!("x_BRTRKFsL_{}", "z".repeat(64 * 1024));
        assert_malformed(parse_token(&token));
        assert_malformed(extract_secret_bytes(&token));

        match parse_token(&token) {
            Err(ApiKeyError::MalformedToken { reason, source }) => {
                assert_eq!(reason, "segment too long");
                assert!(source.is_none());
            }
            other => panic!("expected MalformedToken, got {:?}", other),
        }
    }

    #[test]
    fn test_oversized_key_id_rejected() {
        let token = format!("x_{}_51Fwq", "z".repeat(MAX_SEGMENT_LEN + 1));
        assert_malformed(extract_key_id(&token));

        let token = format!("x_{}_51Fwq", "z".repeat(MAX_SEGMENT_LEN));
        assert_eq!(extract_key_id(&token).unwrap().len(), MAX_SEGMENT_LEN);
    }

    #[test]
    fn test_largest_generated_key_parses() {
        let config = ApiKeyConfig::new("max")
            .with_key_id_length(MAX_KEY_ID_LENGTH)
            .with_secret_entropy(MAX_SECRET_ENTROPY);
        let key = generate_api_key(&config).unwrap();

        let parsed = parse_token(&key.token).unwrap();
        assert_eq!(parsed.secret_bytes().unwrap(), key.secret_bytes);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug = format!("{:?}", parse_token(TOKEN).unwrap());
        assert!(debug.contains("BRTRKFsL"));
        assert!(!debug.contains("51FwqftsmMDHHbJAMEXXHCgG"));
        assert!(debug.contains("[REDACTED]"));
    }
}
