//! # Slot Generation
//!
//! Splits a business day into fixed-length bookable intervals.
//!
//! The walk starts at opening time and advances by exactly one slot length
//! each step, so slots tile the day without gaps or overlap. A slot that
//! would run past closing time is dropped, never truncated, and the walk
//! stops there since every later slot would overrun as well.

use std::iter::FusedIterator;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::models::{
    business_hours::{BusinessHours, SlotDuration},
    interval::TimeInterval,
};

/// Ordered, finite iterator over the slots of one business day.
///
/// Cloning yields an independent walk from the same position, and calling
/// [`generate_slots`] again with the same inputs always yields the same slots.
#[derive(Debug, Clone)]
pub struct Slots {
    cursor: Option<DateTime<Utc>>,
    window_end: DateTime<Utc>,
    step: Duration,
}

impl Slots {
    fn empty() -> Self {
        Self {
            cursor: None,
            window_end: DateTime::<Utc>::MIN_UTC,
            step: Duration::zero(),
        }
    }
}

impl Iterator for Slots {
    type Item = TimeInterval;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.cursor?;
        let end = match start.checked_add_signed(self.step) {
            Some(end) if end <= self.window_end => end,
            _ => {
                self.cursor = None;
                return None;
            }
        };

        self.cursor = Some(end);
        TimeInterval::new(start, end).ok()
    }
}

impl FusedIterator for Slots {}

/// Produces the bookable slots for `day`.
///
/// `hours` are wall-clock hours in `tz`; the returned intervals are UTC.
/// Returns an empty iterator when closing is not after opening, when no slot
/// fits in the window, or when either bound does not exist on that day in
/// `tz` (a DST gap).
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, Utc};
/// use slotbook_core::models::business_hours::{BusinessHours, SlotDuration};
/// use slotbook_core::slots::generate_slots;
///
/// let day = NaiveDate::from_ymd_opt(2030, 3, 4).unwrap();
/// let hours = BusinessHours::new(9, 18).unwrap();
/// let duration = SlotDuration::from_minutes(90).unwrap();
///
/// assert_eq!(generate_slots(day, hours, duration, &Utc).count(), 6);
/// ```
pub fn generate_slots<Tz: TimeZone>(
    day: NaiveDate,
    hours: BusinessHours,
    duration: SlotDuration,
    tz: &Tz,
) -> Slots {
    let window_start = local_hour(day, hours.start_hour(), tz);
    let window_end = local_hour(day, hours.end_hour(), tz);

    match (window_start, window_end) {
        (Some(window_start), Some(window_end)) if window_start < window_end => Slots {
            cursor: Some(window_start),
            window_end,
            step: duration.as_duration(),
        },
        _ => Slots::empty(),
    }
}

fn local_hour<Tz: TimeZone>(day: NaiveDate, hour: u32, tz: &Tz) -> Option<DateTime<Utc>> {
    let naive = day.and_hms_opt(hour, 0, 0)?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}
