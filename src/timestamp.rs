//! Day-precision timestamp tokens.
//!
//! A token is two characters from a 32-symbol alphabet, encoding the low 10
//! bits of the day count since the Unix epoch. The value space wraps every
//! 1024 days, so validation reconstructs the most recent day count the token
//! could refer to before judging its age.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::constants::TIMESTAMP_LENGTH;
use crate::error::TimestampError;

/// Base-32 alphabet used by SRS timestamps.
const BASE_CHARS: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Bits carried by one token character.
const BASE_BITS: u32 = 5;

/// Seconds per timestamp unit (one day).
const PRECISION_SECS: u64 = 60 * 60 * 24;

/// Size of the token value space: two characters of five bits each.
const SLOTS: u64 = 1 << (BASE_BITS * TIMESTAMP_LENGTH as u32);

/// Mask selecting one character's worth of bits.
const CHAR_MASK: u64 = (1 << BASE_BITS) - 1;

/// A generated timestamp token.
///
/// # Examples
///
/// ```
/// use email_srs::Timestamp;
///
/// let ts = Timestamp::now();
/// assert_eq!(ts.as_str().len(), 2);
/// assert!(Timestamp::check(ts.as_str(), 21).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Timestamp(String);

impl Timestamp {
    /// Generates a token for the current time.
    #[must_use]
    pub fn now() -> Self {
        Self::at(SystemTime::now())
    }

    /// Generates a token for the given instant.
    ///
    /// Instants before the Unix epoch are treated as the epoch itself.
    #[must_use]
    pub fn at(time: SystemTime) -> Self {
        let secs = time
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs());
        let days = secs / PRECISION_SECS;

        let mut token = String::with_capacity(TIMESTAMP_LENGTH);
        token.push(BASE_CHARS[((days >> BASE_BITS) & CHAR_MASK) as usize] as char);
        token.push(BASE_CHARS[(days & CHAR_MASK) as usize] as char);

        Self(token)
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validates a token's age against the current time.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError::InvalidChar`] if the token contains a
    /// character outside the alphabet, or [`TimestampError::Expired`] if it
    /// was generated more than `max_age_days` ago. Tokens from the future
    /// wrap forward by almost a full token period and are rejected the same
    /// way.
    pub fn check(token: &str, max_age_days: u32) -> Result<(), TimestampError> {
        Self::check_at(token, max_age_days, SystemTime::now())
    }

    /// Validates a token's age against the given instant.
    ///
    /// # Errors
    ///
    /// See [`Timestamp::check`].
    pub fn check_at(
        token: &str,
        max_age_days: u32,
        now: SystemTime,
    ) -> Result<(), TimestampError> {
        let mut then: u64 = 0;
        for (position, c) in token.chars().enumerate() {
            let upper = c.to_ascii_uppercase();
            let value = BASE_CHARS
                .iter()
                .position(|&b| b as char == upper)
                .ok_or(TimestampError::InvalidChar { char: c, position })?;
            then = (then << BASE_BITS) | value as u64;
        }

        let secs = now
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs());
        let mut today = (secs / PRECISION_SECS) % SLOTS;

        // The token cannot represent a time further back than one wrap
        // period, so the day count it refers to is the most recent one that
        // is not less than the decoded value.
        if today < then {
            today += (then - today).div_ceil(SLOTS) * SLOTS;
        }

        if today > then + u64::from(max_age_days) {
            return Err(TimestampError::Expired {
                age_days: today - then,
                max_age_days,
            });
        }

        Ok(())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Timestamp {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
