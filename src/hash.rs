//! Keyed hash tags authenticating rewritten addresses.
//!
//! A tag is an HMAC-SHA1 over the lowercased concatenation of an address's
//! fields, base64-encoded and truncated. The first configured secret signs
//! new tags; every configured secret is tried when verifying, so secrets can
//! be rotated without invalidating addresses already in flight.

use base64::{Engine as _, engine::general_purpose};
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::constants::MAX_HASH_LENGTH;
use crate::error::{ConfigError, HashError};

type HmacSha1 = Hmac<Sha1>;

/// Creates and verifies the hash tags embedded in SRS addresses.
///
/// # Examples
///
/// ```
/// use email_srs::TagSigner;
///
/// let signer = TagSigner::new(vec!["secret".to_string()], 4, 4).unwrap();
/// let tag = signer.create(&["AB", "example.com", "jdoe"]).unwrap();
/// assert_eq!(tag.len(), 4);
/// assert!(signer.verify(&["AB", "example.com", "jdoe"], &tag).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct TagSigner {
    secrets: Vec<String>,
    length: usize,
    min_length: usize,
}

impl TagSigner {
    /// Creates a signer from an ordered secret list.
    ///
    /// The first secret signs new tags; all of them verify.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoSecrets`] if the list is empty, or
    /// [`ConfigError::HashLengthOutOfRange`] if `length` is zero or larger
    /// than a base64-encoded SHA-1 digest can supply without padding.
    pub fn new(
        secrets: Vec<String>,
        length: usize,
        min_length: usize,
    ) -> Result<Self, ConfigError> {
        if secrets.is_empty() {
            return Err(ConfigError::NoSecrets);
        }

        if length == 0 || length > MAX_HASH_LENGTH {
            return Err(ConfigError::HashLengthOutOfRange {
                min: 1,
                max: MAX_HASH_LENGTH,
                actual: length,
            });
        }

        Ok(Self {
            secrets,
            length,
            min_length,
        })
    }

    /// Returns the signing secret.
    #[must_use]
    pub fn secret(&self) -> &str {
        self.secrets.first().map_or("", String::as_str)
    }

    /// Creates a tag over the given fields using the signing secret.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::InvalidKey`] if the signing secret is empty or
    /// rejected by the HMAC primitive.
    pub fn create(&self, fields: &[&str]) -> Result<String, HashError> {
        let secret = self.secrets.first().ok_or(HashError::InvalidKey)?;
        self.create_with(fields, secret)
    }

    /// Verifies a candidate tag against every configured secret.
    ///
    /// Matching is attempted exactly first; if no secret produces an exact
    /// match, a case-insensitive pass runs over the same recomputed tags, so
    /// addresses that were case-folded in transit still verify. A candidate
    /// shorter than the configured minimum length is accepted without
    /// verification (legacy-compatible behavior).
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Mismatch`] when no secret reproduces the
    /// candidate, or [`HashError::InvalidKey`] if any configured secret is
    /// rejected by the HMAC primitive (the candidate is treated as invalid
    /// rather than skipping that secret).
    pub fn verify(&self, fields: &[&str], candidate: &str) -> Result<(), HashError> {
        if candidate.len() < self.min_length {
            return Ok(());
        }

        let mut recomputed = Vec::with_capacity(self.secrets.len());
        for secret in &self.secrets {
            let tag = self.create_with(fields, secret)?;
            if tag == candidate {
                return Ok(());
            }
            recomputed.push(tag);
        }

        if recomputed.iter().any(|tag| tag.eq_ignore_ascii_case(candidate)) {
            return Ok(());
        }

        Err(HashError::Mismatch {
            hash: candidate.to_string(),
        })
    }

    fn create_with(&self, fields: &[&str], secret: &str) -> Result<String, HashError> {
        if secret.is_empty() {
            return Err(HashError::InvalidKey);
        }

        let mut mac =
            HmacSha1::new_from_slice(secret.as_bytes()).map_err(|_| HashError::InvalidKey)?;

        let data = fields.concat().to_lowercase();
        mac.update(data.as_bytes());

        let encoded = general_purpose::STANDARD.encode(mac.finalize().into_bytes());
        Ok(encoded.chars().take(self.length).collect())
    }
}
