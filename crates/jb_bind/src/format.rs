//! Date and number formatters attached to properties, classes, modules or the
//! global configuration.
//!
//! Patterns are validated when constructed, so a bad pattern surfaces once
//! while a class model is built and never during encoding.

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::fmt;

use chrono::format::{Item, StrftimeItems};
use thiserror::Error;

/// Pattern selecting epoch milliseconds instead of a textual date.
pub const TIME_IN_MILLIS: &str = "##time-in-millis";

// -----------------------------------------------------------------------------
// FormatError

#[derive(Debug, Clone, Error)]
#[error("invalid {kind} pattern `{pattern}`: {reason}")]
pub struct FormatError {
    pub kind: &'static str,
    pub pattern: String,
    pub reason: &'static str,
}

// -----------------------------------------------------------------------------
// DateFormatter

#[derive(Clone, PartialEq, Eq)]
enum DateKind {
    TimeInMillis,
    Pattern(Arc<str>),
}

/// A date pattern in `strftime` syntax, or [`TIME_IN_MILLIS`].
///
/// # Examples
///
/// ```
/// use jb_bind::format::DateFormatter;
///
/// let f = DateFormatter::new("%d.%m.%Y").unwrap();
/// assert_eq!(f.pattern(), "%d.%m.%Y");
/// assert!(DateFormatter::new("%!").is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct DateFormatter(DateKind);

impl DateFormatter {
    pub fn new(pattern: &str) -> Result<Self, FormatError> {
        if pattern == TIME_IN_MILLIS {
            return Ok(Self::time_in_millis());
        }
        let error = |reason| FormatError {
            kind: "date",
            pattern: pattern.to_string(),
            reason,
        };
        if pattern.is_empty() {
            return Err(error("empty pattern"));
        }
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(error("unknown conversion specifier"));
        }
        Ok(Self(DateKind::Pattern(Arc::from(pattern))))
    }

    pub fn time_in_millis() -> Self {
        Self(DateKind::TimeInMillis)
    }

    #[inline]
    pub fn is_time_in_millis(&self) -> bool {
        matches!(self.0, DateKind::TimeInMillis)
    }

    pub fn pattern(&self) -> &str {
        match &self.0 {
            DateKind::TimeInMillis => TIME_IN_MILLIS,
            DateKind::Pattern(pattern) => pattern,
        }
    }
}

impl fmt::Debug for DateFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DateFormatter").field(&self.pattern()).finish()
    }
}

// -----------------------------------------------------------------------------
// NumberFormatter

/// A decimal pattern made of `#`, `0`, `,` and `.`.
///
/// `,` in the integer part enables grouping by thousands, zeros fix the
/// minimum digit counts and `#` marks optional fraction digits.
///
/// # Examples
///
/// ```
/// use jb_bind::format::NumberFormatter;
///
/// let f = NumberFormatter::new("#,##0.00").unwrap();
/// assert_eq!(f.format_float(1234567.891), "1,234,567.89");
/// assert_eq!(f.format_integer(-42), "-42.00");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct NumberFormatter {
    pattern: Arc<str>,
    grouping: bool,
    min_integer: usize,
    min_fraction: usize,
    max_fraction: usize,
}

impl NumberFormatter {
    pub fn new(pattern: &str) -> Result<Self, FormatError> {
        let error = |reason| FormatError {
            kind: "number",
            pattern: pattern.to_string(),
            reason,
        };
        if pattern.is_empty() {
            return Err(error("empty pattern"));
        }
        if pattern.chars().any(|c| !matches!(c, '#' | '0' | ',' | '.')) {
            return Err(error("only `#`, `0`, `,` and `.` are allowed"));
        }

        let (integer, fraction) = match pattern.split_once('.') {
            Some((integer, fraction)) => (integer, fraction),
            None => (pattern, ""),
        };
        if fraction.contains(['.', ',']) {
            return Err(error("separators after the decimal point"));
        }
        if fraction.trim_start_matches('0').contains('0') {
            return Err(error("required fraction digit after an optional one"));
        }

        Ok(Self {
            pattern: Arc::from(pattern),
            grouping: integer.contains(','),
            min_integer: integer.chars().filter(|c| *c == '0').count(),
            min_fraction: fraction.chars().filter(|c| *c == '0').count(),
            max_fraction: fraction.len(),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn format_float(&self, value: f64) -> String {
        self.finish(&alloc::format!("{:.*}", self.max_fraction, value))
    }

    pub fn format_integer(&self, value: impl fmt::Display) -> String {
        self.finish(&value.to_string())
    }

    /// Strips grouping separators so the text parses with `FromStr`.
    ///
    /// A fraction made only of zeros is dropped as well, which lets
    /// integer targets accept `"1,000.00"`.
    pub fn normalize(&self, text: &str) -> String {
        let plain: String = text.chars().filter(|c| *c != ',').collect();
        match plain.split_once('.') {
            Some((integer, fraction)) if fraction.chars().all(|c| c == '0') => integer.to_string(),
            _ => plain,
        }
    }

    fn finish(&self, canonical: &str) -> String {
        let (sign, digits) = match canonical.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", canonical),
        };
        let (integer, fraction) = digits.split_once('.').unwrap_or((digits, ""));

        let mut fraction = fraction.trim_end_matches('0').to_string();
        while fraction.len() < self.min_fraction {
            fraction.push('0');
        }

        let integer = integer.trim_start_matches('0');
        let mut padded = String::new();
        for _ in integer.len()..self.min_integer.max(1) {
            padded.push('0');
        }
        padded.push_str(integer);

        // No negative zero.
        let is_zero = integer.is_empty() && fraction.bytes().all(|b| b == b'0');
        let mut out = String::from(if is_zero { "" } else { sign });
        if self.grouping {
            let len = padded.len();
            for (i, c) in padded.chars().enumerate() {
                if i > 0 && (len - i) % 3 == 0 {
                    out.push(',');
                }
                out.push(c);
            }
        } else {
            out.push_str(&padded);
        }
        if !fraction.is_empty() {
            out.push('.');
            out.push_str(&fraction);
        }
        out
    }
}

impl fmt::Debug for NumberFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NumberFormatter")
            .field(&&*self.pattern)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Formats

/// The formatters in effect for one direction of one value position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Formats {
    pub date: Option<DateFormatter>,
    pub number: Option<NumberFormatter>,
}

impl Formats {
    #[inline]
    pub const fn none() -> Self {
        Self {
            date: None,
            number: None,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.number.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::{DateFormatter, NumberFormatter, TIME_IN_MILLIS};

    #[test]
    fn date_patterns() {
        assert!(DateFormatter::new(TIME_IN_MILLIS).unwrap().is_time_in_millis());
        assert!(DateFormatter::new("").is_err());
        assert!(DateFormatter::new("%Y-%m-%d %H:%M").is_ok());
        assert!(DateFormatter::new("%Y-%!").is_err());
    }

    #[test]
    fn number_patterns() {
        assert!(NumberFormatter::new("0.00 EUR").is_err());
        assert!(NumberFormatter::new("0.#0").is_err());

        let f = NumberFormatter::new("000.000").unwrap();
        assert_eq!(f.format_float(1.5), "001.500");

        let f = NumberFormatter::new("#.##").unwrap();
        assert_eq!(f.format_float(2.0), "2");
        assert_eq!(f.format_float(0.5), "0.5");
        assert_eq!(f.format_float(3.14159), "3.14");

        let f = NumberFormatter::new("#,##0").unwrap();
        assert_eq!(f.format_integer(1234567_u64), "1,234,567");
        assert_eq!(f.format_integer(0), "0");
        assert_eq!(f.format_integer(-999), "-999");
    }

    #[test]
    fn zero_keeps_one_digit() {
        let f = NumberFormatter::new("#,###").unwrap();
        assert_eq!(f.format_integer(0), "0");
        assert_eq!(f.format_integer(1000), "1,000");

        let f = NumberFormatter::new("#.##").unwrap();
        assert_eq!(f.format_float(-0.001), "0");
        assert_eq!(f.format_float(-0.25), "-0.25");

        let f = NumberFormatter::new("0.00").unwrap();
        assert_eq!(f.format_float(-0.001), "0.00");
        assert_eq!(f.normalize(&f.format_float(-0.001)).parse::<f64>().unwrap(), 0.0);
    }

    #[test]
    fn normalize_strips_grouping() {
        let f = NumberFormatter::new("#,##0.00").unwrap();
        assert_eq!(f.normalize("1,234.00"), "1234");
        assert_eq!(f.normalize("1,234.50"), "1234.50");
    }
}
