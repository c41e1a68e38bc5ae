//! API key handling
//!
//! The key is read once from `CHAOS_API_KEY` at startup, validated
//! against the fixed surface format, and held for the process lifetime.

use std::fmt;
use thiserror::Error;

/// Environment variable the key is read from
pub const API_KEY_ENV: &str = "CHAOS_API_KEY";

const API_KEY_PREFIX: &str = "chaos_";
const API_KEY_SUFFIX_LEN: usize = 32;

/// Errors raised while loading the credential at bootstrap
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("CHAOS_API_KEY environment variable is required.")]
    Missing,

    #[error(
        "CHAOS_API_KEY has invalid format. Expected: chaos_ followed by 32 alphanumeric characters."
    )]
    Malformed,
}

/// A validated Chaos Intelligence API key
///
/// The inner token is deliberately kept out of `Debug` output so it
/// never reaches logs.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// Validate the surface format: `chaos_` followed by exactly 32
    /// alphanumeric characters.
    pub fn parse(raw: &str) -> Result<Self, CredentialError> {
        let suffix = raw.strip_prefix(API_KEY_PREFIX).ok_or(CredentialError::Malformed)?;
        if suffix.len() != API_KEY_SUFFIX_LEN || !suffix.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(CredentialError::Malformed);
        }
        Ok(Self(raw.to_string()))
    }

    /// Read and validate the key from the process environment
    pub fn from_env() -> Result<Self, CredentialError> {
        match std::env::var(API_KEY_ENV) {
            Ok(raw) => Self::parse(&raw),
            Err(_) => Err(CredentialError::Missing),
        }
    }

    /// The raw token, for the Authorization header only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey(\"{}****\")", API_KEY_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_key() -> String {
        format!("chaos_{}", "a1B2c3D4e5F6g7H8i9J0k1L2m3N4o5P6")
    }

    #[test]
    fn accepts_well_formed_key() {
        let key = ApiKey::parse(&valid_key()).unwrap();
        assert_eq!(key.expose(), valid_key());
    }

    #[test]
    fn rejects_wrong_prefix() {
        let raw = valid_key().replace("chaos_", "kaos_");
        assert!(matches!(ApiKey::parse(&raw), Err(CredentialError::Malformed)));
    }

    #[test]
    fn rejects_short_suffix() {
        assert!(matches!(
            ApiKey::parse("chaos_abc123"),
            Err(CredentialError::Malformed)
        ));
    }

    #[test]
    fn rejects_long_suffix() {
        let raw = format!("{}x", valid_key());
        assert!(matches!(ApiKey::parse(&raw), Err(CredentialError::Malformed)));
    }

    #[test]
    fn rejects_non_alphanumeric_suffix() {
        let raw = format!("chaos_{}", "a1B2c3D4e5F6g7H8i9J0k1L2m3N4o5P-");
        assert!(matches!(ApiKey::parse(&raw), Err(CredentialError::Malformed)));
    }

    #[test]
    fn debug_output_redacts_token() {
        let key = ApiKey::parse(&valid_key()).unwrap();
        let rendered = format!("{:?}", key);
        assert!(!rendered.contains("a1B2c3D4"));
        assert!(rendered.contains("****"));
    }
}
