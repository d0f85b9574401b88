//! Top-level facade rewriting full `user@host` addresses.

use crate::address;
use crate::error::{ConfigError, RewriteError};
use crate::provider::{Policy, Provider};

/// Rewrites and reverses complete email addresses through a [`Provider`].
///
/// [`forward`](Srs::forward) turns a sender address into one that routes
/// through the forwarding host; [`reverse`](Srs::reverse) recovers the
/// original sender from a rewritten address.
///
/// # Examples
///
/// ```
/// use email_srs::Srs;
///
/// let srs = Srs::guarded(vec!["secret".to_string()]).unwrap();
///
/// let rewritten = srs.forward("jdoe@example.com", "forwarder.com").unwrap();
/// assert!(rewritten.ends_with("@forwarder.com"));
///
/// let original = srs.reverse(&rewritten).unwrap();
/// assert_eq!(original, "jdoe@example.com");
/// ```
#[derive(Debug, Clone)]
pub struct Srs {
    provider: Provider,
}

impl Srs {
    /// Creates a facade over the given provider.
    #[must_use]
    pub fn new(provider: Provider) -> Self {
        Self { provider }
    }

    /// Creates a facade over a default-configured [`Policy::Guarded`]
    /// provider, the variant most forwarders want.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoSecrets`] if `secrets` is empty.
    pub fn guarded(secrets: Vec<String>) -> Result<Self, ConfigError> {
        Ok(Self::new(Provider::new(Policy::Guarded, secrets)?))
    }

    /// Returns the underlying provider.
    #[must_use]
    pub const fn provider(&self) -> &Provider {
        &self.provider
    }

    /// Returns the signing secret.
    #[must_use]
    pub fn secret(&self) -> &str {
        self.provider.secret()
    }

    /// Returns true if the address carries an SRS tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use email_srs::Srs;
    ///
    /// let srs = Srs::guarded(vec!["secret".to_string()]).unwrap();
    /// assert!(srs.is_srs("SRS0=5gnp=ZU=example.com=jdoe@other.com"));
    /// assert!(!srs.is_srs("jdoe@example.com"));
    /// ```
    #[must_use]
    pub fn is_srs(&self, address: &str) -> bool {
        address::is_srs(address)
    }

    /// Rewrites `sender` for forwarding through `alias`.
    ///
    /// `alias` may be a bare host or a full address; only its host part is
    /// used. When the alias host equals the sender's host
    /// (case-insensitively) the sender is returned unchanged; use
    /// [`forward_always`](Srs::forward_always) to rewrite regardless.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::MissingAtSign`] if `sender` contains no `@`,
    /// or [`RewriteError::Compile`] if the signing secret is rejected.
    pub fn forward(&self, sender: &str, alias: &str) -> Result<String, RewriteError> {
        self.forward_inner(sender, alias, false)
    }

    /// Rewrites `sender` for forwarding through `alias`, even when both
    /// live on the same host.
    ///
    /// # Errors
    ///
    /// See [`Srs::forward`].
    pub fn forward_always(&self, sender: &str, alias: &str) -> Result<String, RewriteError> {
        self.forward_inner(sender, alias, true)
    }

    /// Reverses a rewritten address back to the original sender.
    ///
    /// An address whose local part carries no SRS tag is returned unchanged;
    /// a tagged local part that fails validation propagates its parse error.
    /// Guarded addresses peel one layer per call: reversing an `SRS1`
    /// address yields the inner `SRS0` address, and reversing that yields
    /// the original sender.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::MissingAtSign`] if the address contains no
    /// `@`, or [`RewriteError::Parse`] if the local part is SRS-tagged but
    /// malformed, carries an invalid hash, or has expired.
    pub fn reverse(&self, address: &str) -> Result<String, RewriteError> {
        let at = address
            .find('@')
            .ok_or_else(|| RewriteError::MissingAtSign {
                address: address.to_string(),
            })?;
        let local = &address[..at];

        if !address::is_srs(local) {
            return Ok(address.to_string());
        }

        let parsed = self.provider.parse(local).map_err(RewriteError::Parse)?;
        Ok(format!("{}@{}", parsed.user(), parsed.host()))
    }

    fn forward_inner(
        &self,
        sender: &str,
        alias: &str,
        always_rewrite: bool,
    ) -> Result<String, RewriteError> {
        let at = sender.find('@').ok_or_else(|| RewriteError::MissingAtSign {
            address: sender.to_string(),
        })?;

        let send_user = &sender[..at];
        let send_host = &sender[at + 1..];

        if send_user.contains('@') {
            return Err(RewriteError::LocalPartContainsAt {
                address: sender.to_string(),
            });
        }

        let alias_host = alias.find('@').map_or(alias, |pos| &alias[pos + 1..]);

        if alias_host.eq_ignore_ascii_case(send_host) && !always_rewrite {
            return Ok(sender.to_string());
        }

        let compiled = self
            .provider
            .compile(send_host, send_user)
            .map_err(RewriteError::Compile)?;

        Ok(format!("{compiled}@{alias_host}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn srs(policy: Policy) -> Srs {
        Srs::new(Provider::new(policy, vec!["foo".to_string()]).unwrap())
    }

    #[test]
    fn guarded_forward_and_reverse() {
        let srs = Srs::guarded(vec!["dummy-secret".to_string()]).unwrap();

        let forwarded = srs.forward("jdoe@example.com", "other.com").unwrap();
        assert_ne!(forwarded, "jdoe@example.com");
        assert!(forwarded.ends_with("@other.com"));

        assert_eq!(srs.reverse(&forwarded).unwrap(), "jdoe@example.com");
    }

    #[test]
    fn is_srs_recognition() {
        let srs = Srs::guarded(vec!["dummy-secret".to_string()]).unwrap();
        assert!(srs.is_srs("SRS0=5gnp=ZU=example.com=jdoe@other.com"));
        assert!(!srs.is_srs("jdoe@example.com"));
    }

    #[test]
    fn same_host_is_not_rewritten() {
        let srs = srs(Policy::Shortcut);
        let sender = "jdoe@example.com";

        assert_eq!(srs.forward(sender, "alias@Example.COM").unwrap(), sender);

        let rewritten = srs.forward_always(sender, "alias@example.com").unwrap();
        assert!(rewritten.starts_with("SRS0="));
    }

    #[test]
    fn missing_at_sign_is_rejected() {
        let srs = srs(Policy::Shortcut);
        assert!(matches!(
            srs.forward("jdoe", "other.com"),
            Err(RewriteError::MissingAtSign { .. })
        ));
        assert!(matches!(
            srs.reverse("jdoe"),
            Err(RewriteError::MissingAtSign { .. })
        ));
    }

    #[test]
    fn untagged_address_reverses_to_itself() {
        let srs = srs(Policy::Guarded);
        assert_eq!(srs.reverse("jdoe@example.com").unwrap(), "jdoe@example.com");
    }

    #[test]
    fn tagged_but_invalid_address_propagates_the_error() {
        let srs = srs(Policy::Guarded);
        assert!(matches!(
            srs.reverse("SRS0=XXXX=ZU=example.com=jdoe@other.com"),
            Err(RewriteError::Parse(_))
        ));
    }

    #[test]
    fn shortcut_collapses_over_two_hops() {
        let srs = srs(Policy::Shortcut);
        let source = "user@host.tld";

        let new0 = srs.forward(source, "alias0@host0.tld0").unwrap();
        assert!(new0.starts_with("SRS"));
        assert_eq!(srs.reverse(&new0).unwrap(), source);

        let new1 = srs.forward(&new0, "alias1@host1.tld1").unwrap();
        assert!(new1.starts_with("SRS"));
        assert_eq!(srs.reverse(&new1).unwrap(), source);
    }

    #[test]
    fn reversible_unwinds_one_hop_at_a_time() {
        let srs = srs(Policy::Reversible);

        let new0 = srs.forward("user0@host0.tld0", "user1@host1.tld1").unwrap();
        let new1 = srs.forward(&new0, "user2@host2.tld2").unwrap();

        assert_eq!(srs.reverse(&new1).unwrap(), new0);
        assert_eq!(srs.reverse(&new0).unwrap(), "user0@host0.tld0");
    }

    #[test]
    fn guarded_two_layer_reversal() {
        let srs = srs(Policy::Guarded);
        let addr = "user@domain-with-dash.com";

        let srs0 = srs.forward(addr, "foo.com").unwrap();
        let srs1 = srs.forward(&srs0, addr).unwrap();

        assert!(srs0.starts_with("SRS0"));
        assert!(srs1.starts_with("SRS1"));
        assert_eq!(srs1.as_bytes()[4], b'=');

        assert_eq!(srs.reverse(&srs0).unwrap(), addr);
        assert_eq!(srs.reverse(&srs1).unwrap(), srs0);
        assert_eq!(srs.reverse(&srs.reverse(&srs1).unwrap()).unwrap(), addr);
    }

    #[test]
    fn guarded_is_idempotent_per_hop() {
        let srs = srs(Policy::Guarded);
        let aliases = ["user1@tld1.com", "user2@tld2.com"];

        for email in [
            "user@domain-with-dash.com",
            "user-with-dash@domain.com",
            "user+with+plus@domain.com",
            "user%with!everything&everything=@domain.somewhere",
        ] {
            let srs0 = srs.forward(email, aliases[0]).unwrap();
            assert_eq!(srs.reverse(&srs0).unwrap(), email);

            let srs1 = srs.forward(&srs0, aliases[1]).unwrap();
            assert_eq!(srs.reverse(&srs1).unwrap(), srs0);

            // Forwarding to the host the SRS0 address already lives on is a
            // no-op rather than another layer.
            assert_eq!(srs.forward(&srs0, aliases[0]).unwrap(), srs0);
        }
    }

    #[test]
    fn special_local_parts_survive_shortcut() {
        let srs = srs(Policy::Shortcut);
        let alias = "alias@host.com";

        for sender in [
            "user@domain-with-dash.com",
            "user-with-dash@domain.com",
            "user+with+plus@domain.com",
            "user=with=equals@domain.com",
            "user%with!everything&everything=@domain.somewhere",
        ] {
            let rewritten = srs.forward(sender, alias).unwrap();
            assert_eq!(srs.reverse(&rewritten).unwrap(), sender);
        }
    }

    #[test]
    fn case_folded_addresses_still_reverse() {
        let srs = srs(Policy::Guarded);
        let alias0 = "user0@tld0.com";
        let alias1 = "user1@tld1.com";

        for email in [
            "User@domain-with-dash.com",
            "User-with-dash@domain.com",
            "User+with+plus@domain.com",
            "User%with!everything&everything=@domain.somewhere",
        ] {
            let srs0 = srs.forward(email, alias0).unwrap().to_lowercase();
            let reversed = srs.reverse(&srs0).unwrap();
            assert!(reversed.eq_ignore_ascii_case(email));

            let srs1 = srs.forward(&srs0, alias1).unwrap().to_lowercase();
            let reversed = srs.reverse(&srs1).unwrap();
            assert!(reversed.eq_ignore_ascii_case(&srs0));
        }
    }

    #[test]
    fn secret_exposes_the_signing_secret() {
        let srs = srs(Policy::Shortcut);
        assert_eq!(srs.secret(), "foo");
    }

    #[test]
    fn guard_layer_survives_hops_with_different_separators() {
        let hop = |sep| {
            Srs::new(
                Provider::builder(Policy::Guarded)
                    .secret("foo")
                    .separator(sep)
                    .build()
                    .unwrap(),
            )
        };
        let (hop0, hop1, hop2) = (hop('+'), hop('-'), hop('='));

        for sender in [
            "user@domain-with-dash.com",
            "user=with=equals@domain.com",
            "user%with!everything&everything=@domain.somewhere",
        ] {
            let srs0 = hop0.forward(sender, "alias@host.com").unwrap();
            assert_eq!(hop0.reverse(&srs0).unwrap(), sender);

            let srs1 = hop1.forward(&srs0, "name@forwarder.com").unwrap();
            assert!(srs1.starts_with("SRS1-"));
            assert_eq!(hop1.reverse(&srs1).unwrap(), srs0);

            // A third hop refreshes the guard layer rather than nesting.
            let srs2 = hop2.forward(&srs1, "user@postal.com").unwrap();
            assert!(srs2.starts_with("SRS1="));
            assert_eq!(hop2.reverse(&srs2).unwrap(), srs0);
        }
    }
}
