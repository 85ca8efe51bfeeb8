use std::fmt;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when an interval's start is not strictly before its end.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Invalid interval: start {start} is not before end {end}")]
pub struct InvalidIntervalError {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A half-open `[start, end)` span of time with `start < end`.
///
/// The fields are private so the ordering invariant holds for every value,
/// including ones deserialized from a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct TimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawInterval> for TimeInterval {
    type Error = InvalidIntervalError;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        TimeInterval::new(raw.start, raw.end)
    }
}

impl TimeInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, InvalidIntervalError> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(InvalidIntervalError { start, end })
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// True once `now` has reached the start.
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.start <= now
    }

    /// Half-open overlap: intervals that only touch at an endpoint do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Renders the interval as wall-clock times in `tz`, e.g. `09:00 AM - 10:30 AM`.
    pub fn label<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        format!(
            "{} - {}",
            self.start.with_timezone(tz).format("%I:%M %p"),
            self.end.with_timezone(tz).format("%I:%M %p"),
        )
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}
