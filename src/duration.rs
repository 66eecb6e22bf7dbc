//! Expiration expression parsing.
//!
//! An expiration expression is a dash-separated list of terms, each a
//! magnitude followed by a unit:
//!
//! | Unit | Meaning | Seconds |
//! |------|---------|---------|
//! | `y`  | year (365 days) | 31536000 |
//! | `m`  | month (30 days) | 2592000 |
//! | `w`  | week | 604800 |
//! | `d`  | day | 86400 |
//! | `h`  | hour | 3600 |
//! | `mt` | minute | 60 |
//! | `s`  | second | 1 |
//!
//! Terms are summed, so `2w-2d-15mt` is two weeks, two days and fifteen
//! minutes. Any term that does not parse rejects the whole expression.
//!
//! # Example
//!
//! ```
//! use rendercache::duration::parse_expiration;
//!
//! assert_eq!(parse_expiration(Some("2w-2d-15mt"), "48h").unwrap(), 1_383_300);
//! assert_eq!(parse_expiration(None, "48h").unwrap(), 172_800);
//! assert!(parse_expiration(Some("5h-10x"), "48h").is_err());
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CacheError, Result};

/// Separator between terms of an expression.
pub const TERM_SEPARATOR: char = '-';

/// A single term: digits then unit letters, nothing else.
static TERM_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<magnitude>[0-9]+)(?P<unit>[A-Za-z]+)$").expect("TERM_REGEX must compile")
});

/// Unit of an expiration term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl TimeUnit {
    /// All units, largest first.
    pub const ALL: [TimeUnit; 7] = [
        Self::Year,
        Self::Month,
        Self::Week,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
    ];

    /// Number of seconds in one unit.
    pub fn seconds(self) -> u64 {
        match self {
            Self::Year => 31_536_000,
            Self::Month => 2_592_000,
            Self::Week => 604_800,
            Self::Day => 86_400,
            Self::Hour => 3_600,
            Self::Minute => 60,
            Self::Second => 1,
        }
    }

    /// Suffix used in expressions.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Year => "y",
            Self::Month => "m",
            Self::Week => "w",
            Self::Day => "d",
            Self::Hour => "h",
            Self::Minute => "mt",
            Self::Second => "s",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.suffix() == s)
            .ok_or(())
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// One `magnitude × unit` term of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationTerm {
    pub magnitude: u64,
    pub unit: TimeUnit,
}

impl DurationTerm {
    /// Seconds contributed by this term, `None` on overflow.
    pub fn seconds(&self) -> Option<u64> {
        self.magnitude.checked_mul(self.unit.seconds())
    }

    /// Parse a single raw term such as `15mt`.
    ///
    /// Returns `None` when the term is not digits followed by a known unit.
    pub fn parse(raw: &str) -> Option<Self> {
        let caps = TERM_REGEX.captures(raw.trim())?;
        let magnitude = caps["magnitude"].parse().ok()?;
        let unit = caps["unit"].parse().ok()?;
        Some(Self { magnitude, unit })
    }
}

/// Split an expression into its terms, failing on the first bad one.
///
/// `expression` is only used to fill in the error context.
pub fn parse_terms(expression: &str) -> Result<Vec<DurationTerm>> {
    expression
        .split(TERM_SEPARATOR)
        .map(|raw| {
            DurationTerm::parse(raw).ok_or_else(|| CacheError::ExpireFormat {
                expire_data: expression.to_string(),
                bad_tag: raw.trim().to_string(),
            })
        })
        .collect()
}

/// Convert an expiration expression into a budget in seconds.
///
/// An absent or blank `expression` falls back to `default`.
///
/// # Errors
///
/// Returns [`CacheError::ExpireFormat`] naming the first term that is not
/// a non-negative magnitude followed by a known unit, or whose value
/// overflows.
pub fn parse_expiration(expression: Option<&str>, default: &str) -> Result<u64> {
    let expression = match expression.map(str::trim) {
        Some(expr) if !expr.is_empty() => expr,
        _ => default,
    };

    let mut total: u64 = 0;
    for term in parse_terms(expression)? {
        total = term
            .seconds()
            .and_then(|secs| total.checked_add(secs))
            .ok_or_else(|| CacheError::ExpireFormat {
                expire_data: expression.to_string(),
                bad_tag: format!("{}{}", term.magnitude, term.unit),
            })?;
    }

    Ok(total)
}

/// Format a budget as a canonical expression, largest units first.
pub fn format_expiration(seconds: u64) -> String {
    let mut remaining = seconds;
    let mut parts = Vec::new();

    for unit in TimeUnit::ALL {
        let n = remaining / unit.seconds();
        if n > 0 {
            parts.push(format!("{}{}", n, unit));
            remaining %= unit.seconds();
        }
    }

    if parts.is_empty() {
        "0s".to_string()
    } else {
        parts.join("-")
    }
}
