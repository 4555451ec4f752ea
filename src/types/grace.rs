// ABOUTME: Grace period parsing and conversion.
// ABOUTME: Accepts durations of the form <integer><m|h>, like 60m or 720h.

use chrono::TimeDelta;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseGracePeriodError {
    #[error("grace period cannot be empty")]
    Empty,

    #[error("grace period must be a number followed by 'm' (minutes) or 'h' (hours)")]
    MissingUnit,

    #[error("invalid grace period count: '{0}'")]
    InvalidCount(String),
}

/// Minimum idle age before a resource becomes delete-eligible.
///
/// Parsed from `<integer><unit>` where the unit is `m` for minutes or `h`
/// for hours, e.g. `60m` or `720h`. Zero is legal and means every idle
/// resource is eligible immediately. Negative periods are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GracePeriod {
    count: u32,
    unit: GraceUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GraceUnit {
    Minutes,
    Hours,
}

impl GracePeriod {
    pub fn minutes(count: u32) -> Self {
        Self {
            count,
            unit: GraceUnit::Minutes,
        }
    }

    pub fn hours(count: u32) -> Self {
        Self {
            count,
            unit: GraceUnit::Hours,
        }
    }

    /// The period as a signed delta for timestamp arithmetic.
    /// The u32 count keeps this conversion free of overflow.
    pub fn delta(&self) -> TimeDelta {
        match self.unit {
            GraceUnit::Minutes => TimeDelta::minutes(i64::from(self.count)),
            GraceUnit::Hours => TimeDelta::hours(i64::from(self.count)),
        }
    }
}

impl FromStr for GracePeriod {
    type Err = ParseGracePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseGracePeriodError::Empty);
        }

        let unit = match s.chars().last() {
            Some('m') => GraceUnit::Minutes,
            Some('h') => GraceUnit::Hours,
            _ => return Err(ParseGracePeriodError::MissingUnit),
        };

        // The unit is a single ASCII character, so slicing is safe.
        let digits = &s[..s.len() - 1];
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ParseGracePeriodError::InvalidCount(digits.to_string()));
        }

        let count: u32 = digits
            .parse()
            .map_err(|_| ParseGracePeriodError::InvalidCount(digits.to_string()))?;

        Ok(Self { count, unit })
    }
}

impl fmt::Display for GracePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.unit {
            GraceUnit::Minutes => 'm',
            GraceUnit::Hours => 'h',
        };
        write!(f, "{}{}", self.count, unit)
    }
}
