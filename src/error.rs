//! Error types for SRS address construction, parsing, and rewriting.

use std::fmt;

/// Errors raised while building a [`Provider`](crate::Provider).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No secrets were supplied; at least one is required.
    NoSecrets,
    /// The separator is not one of `-`, `+`, `=`.
    InvalidSeparator {
        /// The character that was supplied
        found: char,
    },
    /// The hash length is outside the supported range.
    HashLengthOutOfRange {
        /// Minimum allowed length
        min: usize,
        /// Maximum allowed length
        max: usize,
        /// Actual length requested
        actual: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSecrets => write!(f, "at least one secret is required"),
            Self::InvalidSeparator { found } => {
                write!(f, "invalid separator '{found}'; must be one of '-', '+', '='")
            }
            Self::HashLengthOutOfRange { min, max, actual } => {
                write!(f, "hash length {actual} is outside the range {min}..={max}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors raised while validating a timestamp token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// A character of the token is outside the `A-Z2-7` alphabet.
    InvalidChar {
        /// The offending character
        char: char,
        /// Position in the token
        position: usize,
    },
    /// The token decodes to a point in time outside the allowed window.
    ///
    /// Tokens from the future wrap forward by almost a full token period and
    /// are rejected through this same variant.
    Expired {
        /// Days elapsed since the token was generated
        age_days: u64,
        /// Maximum allowed age in days
        max_age_days: u32,
    },
}

impl fmt::Display for TimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChar { char, position } => {
                write!(f, "bad timestamp character '{char}' at position {position}")
            }
            Self::Expired {
                age_days,
                max_age_days,
            } => {
                write!(f, "timestamp is {age_days} days old, maximum is {max_age_days}")
            }
        }
    }
}

impl std::error::Error for TimestampError {}

/// Errors raised while creating or verifying a hash tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    /// The signing secret was rejected by the HMAC primitive (e.g. empty).
    InvalidKey,
    /// The candidate tag matches none of the configured secrets.
    Mismatch {
        /// The tag that failed verification
        hash: String,
    },
}

impl fmt::Display for HashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKey => write!(f, "secret rejected by the hash primitive"),
            Self::Mismatch { hash } => write!(f, "invalid address hash: {hash}"),
        }
    }
}

impl std::error::Error for HashError {}

/// Errors that can occur when parsing an SRS address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The input that failed to parse
    pub input: String,
    /// The specific error that occurred
    pub kind: ParseErrorKind,
}

/// Specific parsing error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The address does not carry the SRS tag this provider expects.
    NotSrs,
    /// A required field is missing from the tagged payload.
    MissingField {
        /// Name of the missing field
        field: &'static str,
    },
    /// The host field is empty.
    EmptyHost,
    /// The hash tag failed verification.
    InvalidHash(HashError),
    /// The timestamp is malformed or outside the allowed window.
    InvalidTimestamp(TimestampError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse SRS address '{}': ", self.input)?;
        match &self.kind {
            ParseErrorKind::NotSrs => write!(f, "no SRS tag"),
            ParseErrorKind::MissingField { field } => {
                write!(f, "missing required field: {field}")
            }
            ParseErrorKind::EmptyHost => write!(f, "host field is empty"),
            ParseErrorKind::InvalidHash(e) => write!(f, "{e}"),
            ParseErrorKind::InvalidTimestamp(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors raised by the [`Srs`](crate::Srs) facade while rewriting a full
/// `user@host` address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteError {
    /// The address contains no `@`.
    MissingAtSign {
        /// The offending address
        address: String,
    },
    /// The local part of the sender contains an `@`.
    LocalPartContainsAt {
        /// The offending address
        address: String,
    },
    /// Compiling the rewritten local part failed.
    Compile(HashError),
    /// Parsing the SRS local part failed.
    Parse(ParseError),
}

impl fmt::Display for RewriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAtSign { address } => {
                write!(f, "address '{address}' contains no @")
            }
            Self::LocalPartContainsAt { address } => {
                write!(f, "local part of '{address}' may not contain an @")
            }
            Self::Compile(e) => write!(f, "cannot compile SRS address: {e}"),
            Self::Parse(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RewriteError {}
