//! Rewrite providers implementing the three SRS policies.
//!
//! A [`Provider`] owns the immutable configuration (secrets, separator, hash
//! lengths, timestamp window) and implements the two core operations:
//! [`compile`](Provider::compile) rewrites a `host`/`user` pair into a tagged
//! local part, and [`parse`](Provider::parse) validates and reverses one. The
//! three policies share that machinery and differ only in how repeated
//! rewrites behave.

use crate::address::{self, SrsAddress, SrsPrefix};
use crate::constants::{
    DEFAULT_HASH_LENGTH, DEFAULT_HASH_MIN_LENGTH, DEFAULT_MAX_AGE_DAYS, DEFAULT_SEPARATOR,
    FIELD_SEPARATOR, SRS0_TAG, SRS1_TAG,
};
use crate::error::{ConfigError, HashError, ParseError, ParseErrorKind};
use crate::hash::TagSigner;
use crate::separator::Separator;
use crate::timestamp::Timestamp;

/// How a provider treats addresses that have already been rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// Collapse repeated rewrites into a single hop. Rewriting an address
    /// that is already SRS-tagged re-encodes the original sender instead of
    /// nesting another layer.
    Shortcut,
    /// Wrap unconditionally, nesting one layer per forwarding hop; each hop
    /// must be reversed one `parse` at a time.
    Reversible,
    /// Like Shortcut for plain addresses, but an already-tagged address gets
    /// a second `SRS1` guard layer that authenticates the first forwarder's
    /// encoding without re-validating it.
    Guarded,
}

/// A configured SRS rewriter.
///
/// Construction captures the secret list, separator, hash lengths, and
/// timestamp window; afterwards the provider is immutable and can be shared
/// freely across threads.
///
/// # Examples
///
/// ```
/// use email_srs::{Policy, Provider};
///
/// let provider = Provider::builder(Policy::Guarded)
///     .secret("shhh")
///     .separator('+')
///     .build()
///     .unwrap();
///
/// let compiled = provider.compile("example.com", "jdoe").unwrap();
/// assert!(compiled.starts_with("SRS0+"));
///
/// let parsed = provider.parse(&compiled).unwrap();
/// assert_eq!(parsed.host(), "example.com");
/// assert_eq!(parsed.user(), "jdoe");
/// ```
#[derive(Debug, Clone)]
pub struct Provider {
    signer: TagSigner,
    separator: Separator,
    max_age_days: u32,
    policy: Policy,
}

impl Provider {
    /// Creates a provider with default configuration.
    ///
    /// The first secret signs new addresses; all of them verify. Defaults:
    /// separator `=`, hash length 4, hash minimum length 4, maximum
    /// timestamp age 21 days.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoSecrets`] if `secrets` is empty.
    pub fn new(policy: Policy, secrets: Vec<String>) -> Result<Self, ConfigError> {
        Self::builder(policy).secrets(secrets).build()
    }

    /// Returns a builder for a provider with non-default configuration.
    #[must_use]
    pub fn builder(policy: Policy) -> ProviderBuilder {
        ProviderBuilder::new(policy)
    }

    /// Returns the rewrite policy.
    #[must_use]
    pub const fn policy(&self) -> Policy {
        self.policy
    }

    /// Returns the configured separator.
    #[must_use]
    pub const fn separator(&self) -> Separator {
        self.separator
    }

    /// Returns the signing secret.
    #[must_use]
    pub fn secret(&self) -> &str {
        self.signer.secret()
    }

    /// Rewrites a sender's `host`/`user` pair into a tagged local part.
    ///
    /// The result is the local part only; the facade appends `@` and the
    /// forwarding host.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::InvalidKey`] if the signing secret is rejected
    /// by the hash primitive.
    pub fn compile(&self, host: &str, user: &str) -> Result<String, HashError> {
        match self.policy {
            Policy::Shortcut => self.compile_shortcut(host, user),
            Policy::Reversible => self.compile_wrap(host, user),
            Policy::Guarded => self.compile_guarded(host, user),
        }
    }

    /// Validates a tagged local part and recovers the original sender.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] whose kind is
    /// [`NotSrs`](ParseErrorKind::NotSrs) when the expected tag is missing,
    /// [`MissingField`](ParseErrorKind::MissingField) or
    /// [`EmptyHost`](ParseErrorKind::EmptyHost) on structural violations,
    /// [`InvalidHash`](ParseErrorKind::InvalidHash) when no configured
    /// secret reproduces the embedded tag, or
    /// [`InvalidTimestamp`](ParseErrorKind::InvalidTimestamp) when the
    /// timestamp is malformed or stale.
    pub fn parse(&self, address: &str) -> Result<SrsAddress, ParseError> {
        self.parse_inner(address).map_err(|kind| ParseError {
            input: address.to_string(),
            kind,
        })
    }

    fn parse_inner(&self, address: &str) -> Result<SrsAddress, ParseErrorKind> {
        if self.policy == Policy::Guarded && address::is_srs1(address) {
            return self.parse_srs1(address);
        }
        self.parse_srs0(address)
    }

    /// Wraps the pair as a fresh SRS0 address without looking at `user`.
    fn compile_wrap(&self, host: &str, user: &str) -> Result<String, HashError> {
        let timestamp = Timestamp::now();
        let hash = self.signer.create(&[timestamp.as_str(), host, user])?;

        Ok(format!(
            "{SRS0_TAG}{}{hash}={timestamp}={host}={user}",
            self.separator
        ))
    }

    fn compile_shortcut(&self, host: &str, user: &str) -> Result<String, HashError> {
        let (host, user) = unwrap_rewritten(host, user);
        self.compile_wrap(host, user)
    }

    fn compile_guarded(&self, host: &str, user: &str) -> Result<String, HashError> {
        if address::is_srs1(user) {
            // Re-sign the guard layer without interpreting the payload; if a
            // malicious user sent garbage, they get the garbage back.
            let payload = address::strip_tag(user);
            let mut fields = payload.splitn(3, FIELD_SEPARATOR);
            if let (Some(_hash), Some(srs_host), Some(srs_user)) =
                (fields.next(), fields.next(), fields.next())
            {
                let hash = self.signer.create(&[srs_host, srs_user])?;
                return Ok(format!(
                    "{SRS1_TAG}{}{hash}={srs_host}={srs_user}",
                    self.separator
                ));
            }
        } else if address::is_srs0(user) {
            // Strip the tag but keep its separator: the payload's delimiter
            // count must survive so the reverse direction can re-attach the
            // tag verbatim.
            let payload = &user[SRS0_TAG.len()..];
            let hash = self.signer.create(&[host, payload])?;
            return Ok(format!(
                "{SRS1_TAG}{}{hash}={host}={payload}",
                self.separator
            ));
        }

        self.compile_shortcut(host, user)
    }

    fn parse_srs0(&self, address: &str) -> Result<SrsAddress, ParseErrorKind> {
        if !address::is_srs0(address) {
            return Err(ParseErrorKind::NotSrs);
        }

        let payload = address::strip_tag(address);

        // Four fields were encoded; any further '=' belongs to the local
        // part and stays there.
        let mut fields = payload.splitn(4, FIELD_SEPARATOR);
        let hash = fields.next().ok_or(ParseErrorKind::MissingField { field: "hash" })?;
        let timestamp = fields
            .next()
            .ok_or(ParseErrorKind::MissingField { field: "timestamp" })?;
        let host = fields.next().ok_or(ParseErrorKind::MissingField { field: "host" })?;
        let user = fields.next().ok_or(ParseErrorKind::MissingField { field: "user" })?;

        self.signer
            .verify(&[timestamp, host, user], hash)
            .map_err(ParseErrorKind::InvalidHash)?;

        Timestamp::check(timestamp, self.max_age_days)
            .map_err(ParseErrorKind::InvalidTimestamp)?;

        Ok(SrsAddress::new(
            SrsPrefix::Srs0,
            host.to_string(),
            user.to_string(),
            hash.to_string(),
        ))
    }

    fn parse_srs1(&self, address: &str) -> Result<SrsAddress, ParseErrorKind> {
        let payload = address::strip_tag(address);

        let mut fields = payload.splitn(3, FIELD_SEPARATOR);
        let hash = fields.next().ok_or(ParseErrorKind::MissingField { field: "hash" })?;
        let host = fields.next().ok_or(ParseErrorKind::MissingField { field: "host" })?;
        let user = fields.next().ok_or(ParseErrorKind::MissingField { field: "user" })?;

        self.signer
            .verify(&[host, user], hash)
            .map_err(ParseErrorKind::InvalidHash)?;

        if host.is_empty() {
            return Err(ParseErrorKind::EmptyHost);
        }

        // The guard layer stripped the inner SRS0 tag but kept its
        // separator; re-attaching the tag restores the original address.
        Ok(SrsAddress::new(
            SrsPrefix::Srs1,
            host.to_string(),
            format!("{SRS0_TAG}{user}"),
            hash.to_string(),
        ))
    }
}

/// Collapses an already-rewritten local part back to the hop it encodes.
///
/// Returns the pair unchanged when `user` is not tagged, or when a tagged
/// payload is too short to unwrap (it is then wrapped literally).
fn unwrap_rewritten<'a>(host: &'a str, user: &'a str) -> (&'a str, &'a str) {
    if address::is_srs0(user) {
        let payload = address::strip_tag(user);
        let mut fields = payload.splitn(4, FIELD_SEPARATOR);
        if let (Some(_hash), Some(_timestamp), Some(embedded_host), Some(embedded_user)) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        {
            return (embedded_host, embedded_user);
        }
    } else if address::is_srs1(user) {
        // Not expected in normal operation: a guarded address reaching a
        // collapsing provider. The guarded layout puts the embedded host and
        // user at fields four and five of the `=`-split.
        let mut fields = user.splitn(6, FIELD_SEPARATOR).skip(3);
        if let (Some(embedded_host), Some(embedded_user)) = (fields.next(), fields.next()) {
            return (embedded_host, embedded_user);
        }
    }

    (host, user)
}

/// Builder for [`Provider`] instances with non-default configuration.
///
/// # Examples
///
/// ```
/// use email_srs::{Policy, Provider};
///
/// let provider = Provider::builder(Policy::Shortcut)
///     .secret("new-secret")
///     .secret("retired-secret")
///     .separator('-')
///     .hash_length(6)
///     .max_age_days(30)
///     .build()
///     .unwrap();
///
/// assert_eq!(provider.secret(), "new-secret");
/// ```
#[derive(Debug, Clone)]
pub struct ProviderBuilder {
    policy: Policy,
    secrets: Vec<String>,
    separator: char,
    hash_length: usize,
    hash_min_length: usize,
    max_age_days: u32,
}

impl ProviderBuilder {
    fn new(policy: Policy) -> Self {
        Self {
            policy,
            secrets: Vec::new(),
            separator: DEFAULT_SEPARATOR,
            hash_length: DEFAULT_HASH_LENGTH,
            hash_min_length: DEFAULT_HASH_MIN_LENGTH,
            max_age_days: DEFAULT_MAX_AGE_DAYS,
        }
    }

    /// Appends one secret. The first secret added signs new addresses.
    #[must_use]
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secrets.push(secret.into());
        self
    }

    /// Appends a sequence of secrets.
    #[must_use]
    pub fn secrets<I, S>(mut self, secrets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.secrets.extend(secrets.into_iter().map(Into::into));
        self
    }

    /// Sets the separator between the tag and the first field.
    #[must_use]
    pub const fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Sets the length of generated hash tags.
    #[must_use]
    pub const fn hash_length(mut self, length: usize) -> Self {
        self.hash_length = length;
        self
    }

    /// Sets the minimum length an incoming hash tag must have to be
    /// verified; shorter tags are accepted without verification.
    #[must_use]
    pub const fn hash_min_length(mut self, length: usize) -> Self {
        self.hash_min_length = length;
        self
    }

    /// Sets how many days a timestamp stays valid.
    #[must_use]
    pub const fn max_age_days(mut self, days: u32) -> Self {
        self.max_age_days = days;
        self
    }

    /// Validates the configuration and builds the provider.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoSecrets`] if no secret was added,
    /// [`ConfigError::InvalidSeparator`] if the separator is not one of
    /// `-`, `+`, `=`, or [`ConfigError::HashLengthOutOfRange`] if the hash
    /// length cannot be cut from a base64-encoded SHA-1 digest.
    pub fn build(self) -> Result<Provider, ConfigError> {
        let separator = Separator::new(self.separator)?;
        let signer = TagSigner::new(self.secrets, self.hash_length, self.hash_min_length)?;

        Ok(Provider {
            signer,
            separator,
            max_age_days: self.max_age_days,
            policy: self.policy,
        })
    }
}
