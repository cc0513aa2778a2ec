//! Expiration expressions
//!
//! Accepts relative durations the way operators type them (`3m`, `1.5 hours`,
//! `2 days from now`) and RFC 3339 instants (`2030-01-01T00:00:00Z`).

use crate::error::{JwtError, JwtResult};
use chrono::DateTime;
use once_cell::sync::Lazy;
use regex::Regex;

const MINUTE: f64 = 60.0;
const HOUR: f64 = MINUTE * 60.0;
const DAY: f64 = HOUR * 24.0;
const WEEK: f64 = DAY * 7.0;
const YEAR: f64 = DAY * 365.25;

static RELATIVE: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(\+|-)? ?(\d+|\d+\.\d+) ?(seconds?|secs?|s|minutes?|mins?|m|hours?|hrs?|h|days?|d|weeks?|w|years?|yrs?|y)(?: (ago|from now))?$",
    )
});

/// Parsed expiration expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiration {
    /// Offset from the signing instant, in whole seconds (may be negative)
    Relative(i64),
    /// Absolute unix timestamp
    Absolute(i64),
}

impl Expiration {
    /// Parse an expiration expression.
    ///
    /// # Errors
    /// Returns `ExpirationParse` if the text is neither a duration nor an
    /// RFC 3339 instant.
    pub fn parse(text: &str) -> JwtResult<Self> {
        let text = text.trim();

        if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
            return Ok(Expiration::Absolute(instant.timestamp()));
        }

        let relative = RELATIVE
            .as_ref()
            .map_err(|e| JwtError::Internal(format!("Expiration grammar failed to compile: {e}")))?;
        let captures = relative.captures(text).ok_or_else(|| {
            JwtError::ExpirationParse(format!("\"{text}\" is not a duration or RFC 3339 instant"))
        })?;

        let negative = captures.get(1).is_some_and(|sign| sign.as_str() == "-");
        let ago = captures
            .get(4)
            .is_some_and(|suffix| suffix.as_str().eq_ignore_ascii_case("ago"));
        if negative && ago {
            return Err(JwtError::ExpirationParse(format!(
                "\"{text}\" combines a negative sign with \"ago\""
            )));
        }

        let value: f64 = captures[2].parse().map_err(|_| {
            JwtError::ExpirationParse(format!("\"{}\" is not a number", &captures[2]))
        })?;
        let unit = unit_seconds(&captures[3]);
        let seconds = (value * unit).round();
        if !seconds.is_finite() || seconds > i64::MAX as f64 {
            return Err(JwtError::ExpirationParse(format!("\"{text}\" is out of range")));
        }

        #[allow(clippy::cast_possible_truncation)]
        let seconds = seconds as i64;
        Ok(Expiration::Relative(if negative || ago { -seconds } else { seconds }))
    }

    /// Resolve to the `exp` timestamp for a token issued at `issued_at`.
    ///
    /// # Errors
    /// Returns `ExpirationParse` if the result does not lie after `issued_at`.
    pub fn resolve(self, issued_at: i64) -> JwtResult<i64> {
        let exp = match self {
            Expiration::Relative(offset) => issued_at.checked_add(offset).ok_or_else(|| {
                JwtError::expiration_parse("expiration overflows the timestamp range")
            })?,
            Expiration::Absolute(at) => at,
        };
        if exp <= issued_at {
            return Err(JwtError::ExpirationParse(format!(
                "expiration {exp} does not lie after issued-at {issued_at}"
            )));
        }
        Ok(exp)
    }
}

/// Seconds per unit; the grammar guarantees one of these leading letters
fn unit_seconds(unit: &str) -> f64 {
    match unit.as_bytes().first().map(u8::to_ascii_lowercase) {
        Some(b'm') => MINUTE,
        Some(b'h') => HOUR,
        Some(b'd') => DAY,
        Some(b'w') => WEEK,
        Some(b'y') => YEAR,
        _ => 1.0,
    }
}

/// Parse `text` and resolve it against `issued_at` in one step.
///
/// # Errors
/// Returns `ExpirationParse` for unrecognized text or a non-future result.
pub fn resolve_expiration(text: &str, issued_at: i64) -> JwtResult<i64> {
    Expiration::parse(text)?.resolve(issued_at)
}

#[cfg(test)]
mod tests {
    use super::*;

    const IAT: i64 = 1_700_000_000;

    #[test]
    fn minutes_shorthand() {
        assert_eq!(resolve_expiration("3m", IAT), Ok(IAT + 180));
    }

    #[test]
    fn unit_spellings() {
        assert_eq!(Expiration::parse("45s"), Ok(Expiration::Relative(45)));
        assert_eq!(Expiration::parse("45 secs"), Ok(Expiration::Relative(45)));
        assert_eq!(Expiration::parse("2 minutes"), Ok(Expiration::Relative(120)));
        assert_eq!(Expiration::parse("1.5h"), Ok(Expiration::Relative(5400)));
        assert_eq!(Expiration::parse("2 hrs"), Ok(Expiration::Relative(7200)));
        assert_eq!(Expiration::parse("1d"), Ok(Expiration::Relative(86_400)));
        assert_eq!(Expiration::parse("2 weeks"), Ok(Expiration::Relative(1_209_600)));
        assert_eq!(Expiration::parse("1y"), Ok(Expiration::Relative(31_557_600)));
    }

    #[test]
    fn case_insensitive_with_suffix() {
        assert_eq!(
            Expiration::parse("10 Minutes from now"),
            Ok(Expiration::Relative(600))
        );
        assert_eq!(Expiration::parse("+10M"), Ok(Expiration::Relative(600)));
    }

    #[test]
    fn past_offsets_parse_but_do_not_resolve() {
        assert_eq!(Expiration::parse("5m ago"), Ok(Expiration::Relative(-300)));
        assert_eq!(Expiration::parse("-5m"), Ok(Expiration::Relative(-300)));
        assert!(matches!(
            resolve_expiration("5m ago", IAT),
            Err(JwtError::ExpirationParse(_))
        ));
    }

    #[test]
    fn zero_duration_is_rejected() {
        assert!(resolve_expiration("0s", IAT).is_err());
        assert!(resolve_expiration("0.4s", IAT).is_err());
    }

    #[test]
    fn sign_and_ago_together_are_rejected() {
        assert!(Expiration::parse("-5m ago").is_err());
    }

    #[test]
    fn absolute_instant() {
        assert_eq!(
            Expiration::parse("2030-01-01T00:00:00Z"),
            Ok(Expiration::Absolute(1_893_456_000))
        );
        assert_eq!(
            resolve_expiration("2030-01-01T00:00:00Z", IAT),
            Ok(1_893_456_000)
        );
        assert!(resolve_expiration("2001-01-01T00:00:00Z", IAT).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        for text in ["", "soon", "3", "3 fortnights", "m3", "3mm", ".5h", "1700000000"] {
            assert!(
                matches!(Expiration::parse(text), Err(JwtError::ExpirationParse(_))),
                "{text:?} should not parse"
            );
        }
    }

    #[test]
    fn overflow_is_rejected() {
        assert!(resolve_expiration("99999999999999999999y", IAT).is_err());
    }
}
