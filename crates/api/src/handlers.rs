//! Request handlers plus the parsing and loading helpers they share.

pub mod availability;
pub mod bookings;
pub mod slots;
pub mod users;

use chrono::{DateTime, NaiveDate, Utc};
use slotbook_core::{
    errors::{BookingError, BookingResult},
    models::booking::Booking,
};
use slotbook_db::{models::DbBooking, repositories::booking as booking_repo};
use sqlx::PgPool;

/// Parses a `YYYY-MM-DD` path segment.
pub fn parse_date(value: &str) -> BookingResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        BookingError::Validation(format!("Invalid date {:?}, expected YYYY-MM-DD", value))
    })
}

/// Parses an RFC 3339 instant such as `2030-03-04T09:00:00Z`.
pub fn parse_instant(name: &str, value: &str) -> BookingResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|_| {
            BookingError::Validation(format!(
                "Invalid {} time {:?}, expected an RFC 3339 timestamp",
                name, value
            ))
        })
}

/// Converts stored rows into bookings.
///
/// A row that fails conversion means the table holds data the service never
/// writes, so it is reported as an internal error rather than a bad request.
pub fn into_bookings(rows: Vec<DbBooking>) -> BookingResult<Vec<Booking>> {
    rows.into_iter()
        .map(|row| Booking::try_from(row).map_err(|e| BookingError::Internal(Box::new(e))))
        .collect()
}

pub(crate) async fn load_bookings(pool: &PgPool, date: NaiveDate) -> BookingResult<Vec<Booking>> {
    let rows = booking_repo::get_bookings_by_date(pool, date)
        .await
        .map_err(BookingError::Database)?;

    into_bookings(rows)
}
