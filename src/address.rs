//! SRS address grammar: tag recognition and the parsed-address record.

use std::fmt;

use crate::constants::{SRS0_TAG, SRS1_TAG};
use crate::separator::Separator;

/// Tag prefix of a parsed SRS address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SrsPrefix {
    /// First-hop rewrite (`SRS0`).
    Srs0,
    /// Guarded second-layer rewrite (`SRS1`).
    Srs1,
}

impl SrsPrefix {
    /// Returns the tag string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Srs0 => SRS0_TAG,
            Self::Srs1 => SRS1_TAG,
        }
    }
}

impl fmt::Display for SrsPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A successfully parsed SRS address.
///
/// Only [`Provider::parse`](crate::Provider::parse) produces these; the
/// forward direction works on plain strings.
///
/// # Examples
///
/// ```
/// use email_srs::{Policy, Provider, SrsPrefix};
///
/// let provider = Provider::new(Policy::Shortcut, vec!["secret".to_string()]).unwrap();
/// let compiled = provider.compile("example.com", "jdoe").unwrap();
///
/// let parsed = provider.parse(&compiled).unwrap();
/// assert_eq!(parsed.prefix(), SrsPrefix::Srs0);
/// assert_eq!(parsed.host(), "example.com");
/// assert_eq!(parsed.user(), "jdoe");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SrsAddress {
    prefix: SrsPrefix,
    host: String,
    user: String,
    hash: String,
}

impl SrsAddress {
    pub(crate) fn new(prefix: SrsPrefix, host: String, user: String, hash: String) -> Self {
        Self {
            prefix,
            host,
            user,
            hash,
        }
    }

    /// Returns the tag prefix.
    #[must_use]
    pub const fn prefix(&self) -> SrsPrefix {
        self.prefix
    }

    /// Returns the original sender's host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the original sender's local part.
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Returns the hash tag that authenticated this address.
    #[must_use]
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

/// Returns true if the address carries an `SRS0` tag.
///
/// Matching is case-insensitive and accepts any member of the separator set
/// after the tag, not just the separator a provider generates with.
///
/// # Examples
///
/// ```
/// use email_srs::is_srs0;
///
/// assert!(is_srs0("SRS0=5gnp=ZU=example.com=jdoe"));
/// assert!(is_srs0("srs0+x"));
/// assert!(!is_srs0("jdoe"));
/// ```
#[must_use]
pub fn is_srs0(address: &str) -> bool {
    is_tagged(address, SRS0_TAG)
}

/// Returns true if the address carries an `SRS1` tag.
#[must_use]
pub fn is_srs1(address: &str) -> bool {
    is_tagged(address, SRS1_TAG)
}

/// Returns true if the address carries either SRS tag.
#[must_use]
pub fn is_srs(address: &str) -> bool {
    is_srs0(address) || is_srs1(address)
}

/// Removes the 4-character tag plus the separator that follows it.
///
/// Untagged addresses are returned unchanged.
#[must_use]
pub fn strip_tag(address: &str) -> &str {
    if is_srs0(address) || is_srs1(address) {
        &address[SRS0_TAG.len() + 1..]
    } else {
        address
    }
}

fn is_tagged(address: &str, tag: &str) -> bool {
    let bytes = address.as_bytes();
    bytes.len() > tag.len()
        && bytes[..tag.len()].eq_ignore_ascii_case(tag.as_bytes())
        && Separator::is_separator_char(bytes[tag.len()] as char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_srs0_with_any_separator() {
        assert!(is_srs0("SRS0=hash=ts=host=user"));
        assert!(is_srs0("SRS0-hash=ts=host=user"));
        assert!(is_srs0("SRS0+hash=ts=host=user"));
    }

    #[test]
    fn recognition_is_case_insensitive() {
        assert!(is_srs0("srs0=x"));
        assert!(is_srs0("SrS0-x"));
        assert!(is_srs1("srs1+x"));
    }

    #[test]
    fn rejects_untagged_addresses() {
        assert!(!is_srs0("jdoe"));
        assert!(!is_srs0("SRS0"));
        assert!(!is_srs0("SRS0!x"));
        assert!(!is_srs0("SRS1=x"));
        assert!(!is_srs1("SRS0=x"));
        assert!(!is_srs("user@example.com"));
    }

    #[test]
    fn is_srs_accepts_both_tags() {
        assert!(is_srs("SRS0=5gnp=ZU=example.com=jdoe"));
        assert!(is_srs("SRS1=5gnp=forwarder.com==x=y=z=u"));
    }

    #[test]
    fn strip_tag_removes_tag_and_separator() {
        assert_eq!(strip_tag("SRS0=hash=ts=host=user"), "hash=ts=host=user");
        assert_eq!(strip_tag("SRS1-hash=host=user"), "hash=host=user");
    }

    #[test]
    fn strip_tag_leaves_untagged_addresses_alone() {
        assert_eq!(strip_tag("jdoe"), "jdoe");
        assert_eq!(strip_tag("SRS0"), "SRS0");
    }

    #[test]
    fn prefix_round_trips_through_display() {
        assert_eq!(SrsPrefix::Srs0.to_string(), "SRS0");
        assert_eq!(SrsPrefix::Srs1.to_string(), "SRS1");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_to_json() {
        let address = SrsAddress::new(
            SrsPrefix::Srs0,
            "example.com".to_string(),
            "jdoe".to_string(),
            "5gnp".to_string(),
        );

        let json = serde_json::to_value(&address).unwrap();
        assert_eq!(json["prefix"], "Srs0");
        assert_eq!(json["host"], "example.com");
        assert_eq!(json["user"], "jdoe");
        assert_eq!(json["hash"], "5gnp");
    }
}
