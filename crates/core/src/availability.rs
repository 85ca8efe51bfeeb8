//! # Availability Checks
//!
//! Decides whether a candidate interval is free given the bookings already
//! made for its day. The checks are plain interval math and know nothing
//! about dates; callers narrow the existing bookings to the candidate's day
//! first, e.g. with [`bookings_on`].
//!
//! Two intervals conflict when `a.start < b.end && b.start < a.end`, so a
//! booking ending at 10:30 leaves a 10:30 start free.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{
    booking::Booking,
    interval::{InvalidIntervalError, TimeInterval},
};

/// Returns `true` when `candidate` overlaps none of `existing`.
pub fn is_available<'a, I>(candidate: &TimeInterval, existing: I) -> bool
where
    I: IntoIterator<Item = &'a TimeInterval>,
{
    first_conflict(candidate, existing).is_none()
}

/// Returns the first existing interval that overlaps `candidate`, if any.
pub fn first_conflict<'a, I>(candidate: &TimeInterval, existing: I) -> Option<&'a TimeInterval>
where
    I: IntoIterator<Item = &'a TimeInterval>,
{
    existing
        .into_iter()
        .find(|booked| candidate.overlaps(booked))
}

/// Availability for a candidate given as raw instants.
///
/// A candidate with `start >= end` is rejected with [`InvalidIntervalError`]
/// instead of being reported as either free or taken.
pub fn check_availability<'a, I>(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    existing: I,
) -> Result<bool, InvalidIntervalError>
where
    I: IntoIterator<Item = &'a TimeInterval>,
{
    let candidate = TimeInterval::new(start, end)?;
    Ok(is_available(&candidate, existing))
}

/// Intervals of the bookings on `day` that still hold their slot.
pub fn bookings_on<'a>(
    day: NaiveDate,
    bookings: &'a [Booking],
) -> impl Iterator<Item = &'a TimeInterval> + 'a {
    bookings
        .iter()
        .filter(move |booking| booking.date == day && booking.status.blocks_slot())
        .map(|booking| &booking.interval)
}
