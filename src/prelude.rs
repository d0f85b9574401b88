//! Convenient re-exports for glob imports.
//!
//! This module provides a single import for all common types:
//!
//! ```rust
//! use email_srs::prelude::*;
//!
//! let srs = Srs::guarded(vec!["secret".to_string()]).unwrap();
//! let rewritten = srs.forward("jdoe@example.com", "forwarder.com").unwrap();
//! assert!(is_srs0(&rewritten));
//! ```

pub use crate::{
    // Core types
    Policy, Provider, ProviderBuilder, Separator, Srs, SrsAddress, SrsPrefix, TagSigner,
    Timestamp,
    // Grammar helpers
    is_srs, is_srs0, is_srs1, strip_tag,
    // Errors
    ConfigError, HashError, ParseError, ParseErrorKind, RewriteError, TimestampError,
    // Constants
    DEFAULT_HASH_LENGTH, DEFAULT_HASH_MIN_LENGTH, DEFAULT_MAX_AGE_DAYS, DEFAULT_SEPARATOR,
    FIELD_SEPARATOR, MAX_HASH_LENGTH, SEPARATOR_CHARS, SRS0_TAG, SRS1_TAG, TIMESTAMP_LENGTH,
};
