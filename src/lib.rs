//! Encoder, validator and reverser for SRS (Sender Rewriting Scheme)
//! email addresses.
//!
//! A host that forwards mail breaks SPF: the receiving server sees the
//! forwarder's IP but the original sender's domain. SRS rewrites the
//! envelope sender so bounces route back through the forwarder, and makes
//! the rewrite reversible and tamper-evident:
//!
//! ```text
//! jdoe@example.com  ->  SRS0=<hash>=<timestamp>=example.com=jdoe@forwarder.com
//! ```
//!
//! The hash is a truncated HMAC-SHA1 keyed by the forwarder's secret; the
//! timestamp bounds how long the rewritten address stays routable.
//!
//! # Quick Start
//!
//! ```rust
//! use email_srs::Srs;
//!
//! let srs = Srs::guarded(vec!["secret".to_string()]).unwrap();
//!
//! // Rewrite for forwarding
//! let rewritten = srs.forward("jdoe@example.com", "forwarder.com").unwrap();
//! assert!(rewritten.starts_with("SRS0=") && rewritten.ends_with("@forwarder.com"));
//!
//! // Route a bounce back to the original sender
//! assert_eq!(srs.reverse(&rewritten).unwrap(), "jdoe@example.com");
//! ```
//!
//! # Policies
//!
//! Three [`Policy`] variants control what happens when an already-rewritten
//! address is forwarded again:
//!
//! - [`Shortcut`](Policy::Shortcut) collapses repeated rewrites into a
//!   single hop, re-encoding the original sender each time.
//! - [`Reversible`](Policy::Reversible) nests a fresh layer per hop; each
//!   layer is peeled off by one `reverse`.
//! - [`Guarded`](Policy::Guarded) wraps an already-tagged address in an
//!   `SRS1` guard layer that authenticates the first forwarder's encoding,
//!   so multi-forwarder chains stay two layers deep.
//!
//! # Configuration
//!
//! Providers are built once and reused; secrets, separator, hash length and
//! timestamp window are fixed at construction:
//!
//! ```rust
//! use email_srs::{Policy, Provider, Srs};
//!
//! let provider = Provider::builder(Policy::Guarded)
//!     .secret("current-secret")
//!     .secret("retired-secret") // still verifies old addresses
//!     .separator('+')
//!     .max_age_days(30)
//!     .build()
//!     .unwrap();
//!
//! let srs = Srs::new(provider);
//! # let _ = srs;
//! ```
//!
//! # Wire Format
//!
//! ```text
//! SRS0<sep><hash>=<timestamp>=<host>=<user>
//! SRS1<sep><hash>=<host>=<user>
//! ```
//!
//! `<sep>` is one of `-`, `+`, `=` (configurable per provider; recognition
//! accepts all three). Fields after the tag are always `=`-delimited, and
//! the final field absorbs any further `=` characters so local parts
//! containing `=` survive the round trip.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod address;
mod constants;
mod error;
mod hash;
pub mod prelude;
mod provider;
mod separator;
mod srs;
mod timestamp;

pub use address::{SrsAddress, SrsPrefix, is_srs, is_srs0, is_srs1, strip_tag};
pub use constants::{
    DEFAULT_HASH_LENGTH, DEFAULT_HASH_MIN_LENGTH, DEFAULT_MAX_AGE_DAYS, DEFAULT_SEPARATOR,
    FIELD_SEPARATOR, MAX_HASH_LENGTH, SEPARATOR_CHARS, SRS0_TAG, SRS1_TAG, TIMESTAMP_LENGTH,
};
pub use error::{
    ConfigError, HashError, ParseError, ParseErrorKind, RewriteError, TimestampError,
};
pub use hash::TagSigner;
pub use provider::{Policy, Provider, ProviderBuilder};
pub use separator::Separator;
pub use srs::Srs;
pub use timestamp::Timestamp;
