//! Constants for SRS address generation and validation.

/// Tag marking a first-hop rewritten address.
pub const SRS0_TAG: &str = "SRS0";

/// Tag marking a guarded (second-layer) rewritten address.
pub const SRS1_TAG: &str = "SRS1";

/// Characters accepted as the separator between the tag and the first field.
///
/// Recognition of existing SRS addresses accepts any of these, regardless of
/// the separator a provider was configured with.
pub const SEPARATOR_CHARS: [char; 3] = ['-', '+', '='];

/// Fixed separator between the fields that follow the tag.
///
/// Only the character glueing the tag to the first field is configurable;
/// everything after it is always `=`-delimited.
pub const FIELD_SEPARATOR: char = '=';

/// Default separator between the tag and the first field.
pub const DEFAULT_SEPARATOR: char = '=';

/// Default length of the generated hash tag in characters.
pub const DEFAULT_HASH_LENGTH: usize = 4;

/// Default minimum length of an incoming hash tag for it to be verified.
pub const DEFAULT_HASH_MIN_LENGTH: usize = 4;

/// Default number of days a timestamp stays valid.
pub const DEFAULT_MAX_AGE_DAYS: u32 = 21;

/// Maximum configurable hash length.
///
/// A base64-encoded SHA-1 digest carries 27 data characters before the pad
/// character; a longer tag would put a literal `=` inside the hash field and
/// corrupt field splitting.
pub const MAX_HASH_LENGTH: usize = 27;

/// Length of a generated timestamp token in characters.
pub const TIMESTAMP_LENGTH: usize = 2;
