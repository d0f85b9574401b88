//! Separator type glueing the SRS tag to the first field.

use std::fmt;
use std::str::FromStr;

use crate::constants::DEFAULT_SEPARATOR;
use crate::error::ConfigError;

/// A validated separator character.
///
/// The separator sits between the `SRS0`/`SRS1` tag and the first field of a
/// generated address and must be one of `-`, `+`, `=`. Recognition of
/// incoming addresses accepts any of the three regardless of which one a
/// provider generates with.
///
/// # Examples
///
/// ```
/// use email_srs::Separator;
///
/// let sep = Separator::new('+').unwrap();
/// assert_eq!(sep.as_char(), '+');
///
/// assert!(Separator::new('!').is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Separator(char);

impl Separator {
    /// Creates a separator from a character.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSeparator`] if the character is not one
    /// of `-`, `+`, `=`.
    pub fn new(c: char) -> Result<Self, ConfigError> {
        if Self::is_separator_char(c) {
            Ok(Self(c))
        } else {
            Err(ConfigError::InvalidSeparator { found: c })
        }
    }

    /// Returns the separator as a `char`.
    #[must_use]
    pub const fn as_char(self) -> char {
        self.0
    }

    /// Returns true if the character is a member of the separator set.
    #[must_use]
    pub const fn is_separator_char(c: char) -> bool {
        matches!(c, '-' | '+' | '=')
    }
}

impl Default for Separator {
    fn default() -> Self {
        Self(DEFAULT_SEPARATOR)
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Separator {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::new(c),
            _ => Err(ConfigError::InvalidSeparator {
                found: s.chars().next().unwrap_or('\0'),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SEPARATOR_CHARS;

    #[test]
    fn accepts_the_separator_set() {
        for c in SEPARATOR_CHARS {
            let sep = Separator::new(c).unwrap();
            assert_eq!(sep.as_char(), c);
        }
    }

    #[test]
    fn rejects_other_characters() {
        for c in ['!', '_', ' ', 'a', '0'] {
            assert!(matches!(
                Separator::new(c),
                Err(ConfigError::InvalidSeparator { found }) if found == c
            ));
        }
    }

    #[test]
    fn default_is_equals() {
        assert_eq!(Separator::default().as_char(), '=');
    }

    #[test]
    fn from_str_single_char_only() {
        assert_eq!("+".parse::<Separator>().unwrap().as_char(), '+');
        assert!("+=".parse::<Separator>().is_err());
        assert!("".parse::<Separator>().is_err());
    }
}
