//! Time-of-day intervals.
//!
//! A [`TimeInterval`] is a half-open `[start, end)` span within a single day.
//! Two intervals that merely touch (one ends at 09:00, the next starts at
//! 09:00) do not overlap.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Format used for parsing and displaying times of day.
pub const TIME_FORMAT: &str = "%H:%M";

/// Immutable start/end pair with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval", into = "RawInterval")]
pub struct TimeInterval {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeInterval {
    /// Build an interval, rejecting `start >= end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse two `HH:MM` strings into an interval.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        let start = parse_time_of_day(start)?;
        let end = parse_time_of_day(end)?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Half-open overlap test. Symmetric; touching endpoints do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && self.end > other.start
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format(TIME_FORMAT),
            self.end.format(TIME_FORMAT)
        )
    }
}

/// Parse a 24-hour `HH:MM` time of day. Surrounding whitespace is ignored.
///
/// Both fields must be exactly two digits: `9:00` and `10:5` are rejected.
pub fn parse_time_of_day(text: &str) -> Result<NaiveTime, ValidationError> {
    let invalid = || ValidationError::InvalidTimeFormat {
        value: text.to_string(),
    };

    let trimmed = text.trim();
    let bytes = trimmed.as_bytes();
    let well_formed = bytes.len() == 5
        && bytes[2] == b':'
        && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
    if !well_formed {
        return Err(invalid());
    }

    NaiveTime::parse_from_str(trimmed, TIME_FORMAT).map_err(|_| invalid())
}

/// Wire form: `{ "start": "09:00", "end": "10:00" }`.
#[derive(Serialize, Deserialize)]
struct RawInterval {
    start: String,
    end: String,
}

impl TryFrom<RawInterval> for TimeInterval {
    type Error = ValidationError;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        TimeInterval::parse(&raw.start, &raw.end)
    }
}

impl From<TimeInterval> for RawInterval {
    fn from(interval: TimeInterval) -> Self {
        Self {
            start: interval.start.format(TIME_FORMAT).to_string(),
            end: interval.end.format(TIME_FORMAT).to_string(),
        }
    }
}
