//! Query parameter parsing and validation.
//!
//! Parsing never fails: a missing, empty or malformed value silently falls
//! back to its default. Only [`DelayParams::validate`] can reject a request.

use delay_server_core::ValidationError;
use std::time::Duration;

/// Default for `max` when absent or unparseable.
pub const DEFAULT_MAX_MS: i64 = 1;
/// Default for `min` when absent or unparseable.
pub const DEFAULT_MIN_MS: i64 = 0;
/// Default for `failure` when absent or unparseable. Zero disables failures.
pub const DEFAULT_FAILURE_CHANCE: i64 = 0;
/// Largest accepted `max`, in milliseconds.
pub const MAX_DELAY_CEILING_MS: u64 = 30_000;

/// Delay parameters as read from the query string, not yet validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayParams {
    /// Lower delay bound in milliseconds (`min`).
    pub min_ms: i64,
    /// Upper delay bound in milliseconds (`max`).
    pub max_ms: i64,
    /// One-in-N failure chance (`failure`); zero or negative disables it.
    pub failure_chance: i64,
}

impl Default for DelayParams {
    fn default() -> Self {
        Self {
            min_ms: DEFAULT_MIN_MS,
            max_ms: DEFAULT_MAX_MS,
            failure_chance: DEFAULT_FAILURE_CHANCE,
        }
    }
}

impl DelayParams {
    /// Reads `max`, `min` and `failure` from decoded query pairs.
    ///
    /// The first occurrence of a key wins, even when its value does not
    /// parse. Unknown keys are ignored.
    ///
    /// ```
    /// use delay_server_handler::DelayParams;
    ///
    /// let params = DelayParams::from_pairs([("min", "10"), ("max", "0x20"), ("failure", "oops")]);
    /// assert_eq!(params.min_ms, 10);
    /// assert_eq!(params.max_ms, 32);
    /// assert_eq!(params.failure_chance, 0);
    /// ```
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut max = None;
        let mut min = None;
        let mut failure = None;

        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "max" => &mut max,
                "min" => &mut min,
                "failure" => &mut failure,
                _ => continue,
            };
            slot.get_or_insert_with(|| parse_int(value.as_ref()));
        }

        Self {
            min_ms: min.flatten().unwrap_or(DEFAULT_MIN_MS),
            max_ms: max.flatten().unwrap_or(DEFAULT_MAX_MS),
            failure_chance: failure.flatten().unwrap_or(DEFAULT_FAILURE_CHANCE),
        }
    }

    /// Checks the bounds, in order: `max` range, `min` sign, `max >= min`.
    ///
    /// The first violated constraint is returned; nothing after it is
    /// evaluated.
    pub fn validate(&self, ceiling_ms: u64) -> Result<ValidatedDelay, ValidationError> {
        let max_ms = u64::try_from(self.max_ms)
            .ok()
            .filter(|max| *max <= ceiling_ms)
            .ok_or(ValidationError::MaxOutOfRange { limit: ceiling_ms })?;
        let min_ms = u64::try_from(self.min_ms).map_err(|_| ValidationError::NegativeMin)?;
        if max_ms < min_ms {
            return Err(ValidationError::MaxBelowMin);
        }

        Ok(ValidatedDelay {
            min_ms,
            max_ms,
            failure_chance: u32::try_from(self.failure_chance).unwrap_or(0),
        })
    }
}

/// Delay bounds that passed validation: `min_ms <= max_ms <= ceiling`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedDelay {
    min_ms: u64,
    max_ms: u64,
    failure_chance: u32,
}

impl ValidatedDelay {
    /// Lower delay bound in milliseconds.
    pub fn min_ms(&self) -> u64 {
        self.min_ms
    }

    /// Upper delay bound in milliseconds.
    pub fn max_ms(&self) -> u64 {
        self.max_ms
    }

    /// One-in-N failure chance, or `None` when failures are disabled.
    pub fn failure_chance(&self) -> Option<u32> {
        (self.failure_chance > 0).then_some(self.failure_chance)
    }

    /// Lower bound as a duration.
    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_ms)
    }

    /// Upper bound as a duration.
    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_ms)
    }
}

/// Parses a 32-bit signed integer literal.
///
/// Accepts an optional sign followed by a decimal number, or a number with a
/// base prefix: `0x` (hex), `0o` (octal), `0b` (binary), or a bare leading
/// `0` (octal). Prefix letters are case-insensitive. A `_` may separate
/// digits, or follow a prefix. Returns `None` for anything else, including
/// values outside the `i32` range.
///
/// ```
/// use delay_server_handler::params::parse_int;
///
/// assert_eq!(parse_int("250"), Some(250));
/// assert_eq!(parse_int("-0x1F"), Some(-31));
/// assert_eq!(parse_int("017"), Some(15));
/// assert_eq!(parse_int("1_000"), Some(1000));
/// assert_eq!(parse_int("4294967296"), None);
/// assert_eq!(parse_int(""), None);
/// ```
pub fn parse_int(input: &str) -> Option<i64> {
    let (negative, unsigned) = match input.as_bytes().first()? {
        b'-' => (true, &input[1..]),
        b'+' => (false, &input[1..]),
        _ => (false, input),
    };

    let (radix, digits, after_prefix) = split_radix(unsigned);
    if digits.is_empty() || !separators_ok(digits, after_prefix) {
        return None;
    }

    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    if cleaned.is_empty() || !cleaned.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }

    let magnitude = i128::from(u64::from_str_radix(&cleaned, radix).ok()?);
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).ok().map(i64::from)
}

fn split_radix(s: &str) -> (u32, &str, bool) {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 && bytes[0] == b'0' {
        return match bytes[1].to_ascii_lowercase() {
            b'x' => (16, &s[2..], true),
            b'o' => (8, &s[2..], true),
            b'b' => (2, &s[2..], true),
            _ => (8, &s[1..], true),
        };
    }
    (10, s, false)
}

// A separator must follow a digit (or the prefix) and must not end the literal.
fn separators_ok(digits: &str, after_prefix: bool) -> bool {
    let mut prev_is_digit = after_prefix;
    let mut last_is_separator = false;
    for b in digits.bytes() {
        if b == b'_' {
            if !prev_is_digit {
                return false;
            }
            prev_is_digit = false;
            last_is_separator = true;
        } else {
            prev_is_digit = true;
            last_is_separator = false;
        }
    }
    !last_is_separator
}
