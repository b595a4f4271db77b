//! Bucket granularity for timing fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{InvalidUnitError, ModelError};

/// Calendar or clock unit a field's values are bucketed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IntervalUnit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl IntervalUnit {
    /// All units, coarsest first.
    pub const ALL: [IntervalUnit; 8] = [
        IntervalUnit::Year,
        IntervalUnit::Month,
        IntervalUnit::Week,
        IntervalUnit::Day,
        IntervalUnit::Hour,
        IntervalUnit::Minute,
        IntervalUnit::Second,
        IntervalUnit::Millisecond,
    ];

    /// Full plural unit name, e.g. `"months"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Year => "years",
            Self::Month => "months",
            Self::Week => "weeks",
            Self::Day => "days",
            Self::Hour => "hours",
            Self::Minute => "minutes",
            Self::Second => "seconds",
            Self::Millisecond => "milliseconds",
        }
    }

    /// Shorthand code accepted by [`canonical_unit`].
    pub fn code(self) -> &'static str {
        match self {
            Self::Year => "y",
            Self::Month => "M",
            Self::Week => "w",
            Self::Day => "d",
            Self::Hour => "h",
            Self::Minute => "m",
            Self::Second => "s",
            Self::Millisecond => "ms",
        }
    }
}

impl fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IntervalUnit {
    type Err = InvalidUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        canonical_unit(s)
    }
}

/// Maps a shorthand interval code to its unit.
///
/// Codes are case sensitive: `M` is months and `m` is minutes.
///
/// # Errors
///
/// Returns [`InvalidUnitError`] for any code outside the recognized set.
pub fn canonical_unit(code: &str) -> Result<IntervalUnit, InvalidUnitError> {
    match code {
        "y" => Ok(IntervalUnit::Year),
        "M" => Ok(IntervalUnit::Month),
        "w" => Ok(IntervalUnit::Week),
        "d" => Ok(IntervalUnit::Day),
        "h" => Ok(IntervalUnit::Hour),
        "m" => Ok(IntervalUnit::Minute),
        "s" => Ok(IntervalUnit::Second),
        "ms" => Ok(IntervalUnit::Millisecond),
        other => Err(InvalidUnitError {
            code: other.to_string(),
        }),
    }
}

/// Bucket size: `count` consecutive `unit`s form one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval", into = "RawInterval")]
pub struct TimeInterval {
    unit: IntervalUnit,
    count: u32,
}

impl TimeInterval {
    /// Creates an interval, rejecting a zero multiplier.
    pub fn new(unit: IntervalUnit, count: u32) -> Result<Self, ModelError> {
        if count == 0 {
            return Err(ModelError::InvalidIntervalCount);
        }
        Ok(Self { unit, count })
    }

    /// Creates an interval from a shorthand unit code such as `"M"`.
    pub fn from_code(code: &str, count: u32) -> Result<Self, ModelError> {
        Self::new(canonical_unit(code)?, count)
    }

    pub fn unit(&self) -> IntervalUnit {
        self.unit
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.count, self.unit)
    }
}

/// Wire shape of an interval: `{ "unit": "M", "count": 1 }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawInterval {
    unit: String,
    count: u32,
}

impl TryFrom<RawInterval> for TimeInterval {
    type Error = ModelError;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        Self::from_code(&raw.unit, raw.count)
    }
}

impl From<TimeInterval> for RawInterval {
    fn from(interval: TimeInterval) -> Self {
        Self {
            unit: interval.unit.code().to_string(),
            count: interval.count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_round_trips() {
        for unit in IntervalUnit::ALL {
            assert_eq!(canonical_unit(unit.code()), Ok(unit));
        }
    }

    #[test]
    fn month_and_minute_are_case_sensitive() {
        assert_eq!(canonical_unit("M").unwrap().name(), "months");
        assert_eq!(canonical_unit("m").unwrap().name(), "minutes");
    }

    #[test]
    fn unknown_code_is_rejected() {
        let err = canonical_unit("Q").unwrap_err();
        assert_eq!(err.code, "Q");
        assert!("".parse::<IntervalUnit>().is_err());
        assert!("months".parse::<IntervalUnit>().is_err());
    }

    #[test]
    fn zero_count_is_rejected() {
        assert_eq!(
            TimeInterval::new(IntervalUnit::Day, 0),
            Err(ModelError::InvalidIntervalCount)
        );
    }

    #[test]
    fn interval_wire_format_uses_codes() {
        let interval: TimeInterval =
            serde_json::from_str(r#"{"unit":"M","count":3}"#).expect("deserialize interval");
        assert_eq!(interval.unit(), IntervalUnit::Month);
        assert_eq!(interval.count(), 3);

        let json = serde_json::to_string(&interval).expect("serialize interval");
        assert_eq!(json, r#"{"unit":"M","count":3}"#);

        let bad = serde_json::from_str::<TimeInterval>(r#"{"unit":"Q","count":1}"#);
        assert!(bad.is_err());
    }
}
