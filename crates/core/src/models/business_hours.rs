use std::num::NonZeroU32;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::{
    errors::{BookingError, BookingResult},
    models::interval::TimeInterval,
    slots::{generate_slots, Slots},
};

/// Daily open/close bounds, as whole wall-clock hours.
///
/// Both hours are checked to lie in `[0, 24)`. An `end_hour` at or before
/// `start_hour` is accepted so misconfiguration surfaces as "no slots" rather
/// than a startup failure; see [`BusinessHours::is_degenerate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BusinessHours {
    start_hour: u32,
    end_hour: u32,
}

impl BusinessHours {
    pub fn new(start_hour: u32, end_hour: u32) -> BookingResult<Self> {
        for (name, hour) in [("start", start_hour), ("end", end_hour)] {
            if hour >= 24 {
                return Err(BookingError::Validation(format!(
                    "Business {} hour must be between 0 and 23, got {}",
                    name, hour
                )));
            }
        }

        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    pub fn is_degenerate(&self) -> bool {
        self.end_hour <= self.start_hour
    }
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 18,
        }
    }
}

/// Length of a single bookable slot in minutes. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotDuration(NonZeroU32);

impl SlotDuration {
    pub fn from_minutes(minutes: u32) -> BookingResult<Self> {
        NonZeroU32::new(minutes)
            .map(Self)
            .ok_or_else(|| BookingError::Validation("Slot duration must be positive".to_string()))
    }

    pub fn minutes(&self) -> u32 {
        self.0.get()
    }

    pub fn as_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.0.get()))
    }
}

impl Default for SlotDuration {
    fn default() -> Self {
        Self(NonZeroU32::new(90).unwrap_or(NonZeroU32::MIN))
    }
}

/// Everything needed to lay out a business day: hours, slot length, and the
/// time zone the hours are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingSettings {
    pub business_hours: BusinessHours,
    pub slot_duration: SlotDuration,
    pub timezone: Tz,
}

impl Default for BookingSettings {
    fn default() -> Self {
        Self {
            business_hours: BusinessHours::default(),
            slot_duration: SlotDuration::default(),
            timezone: Tz::UTC,
        }
    }
}

impl BookingSettings {
    pub fn slots_for(&self, day: NaiveDate) -> Slots {
        generate_slots(day, self.business_hours, self.slot_duration, &self.timezone)
    }

    /// The calendar day containing `instant` in the business time zone.
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.timezone).date_naive()
    }

    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        self.local_date(now)
    }

    /// Whether both ends of `interval` fall on `date` in the business time zone.
    pub fn falls_on(&self, interval: &TimeInterval, date: NaiveDate) -> bool {
        self.local_date(interval.start()) == date && self.local_date(interval.end()) == date
    }
}
