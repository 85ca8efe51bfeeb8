use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{business_hours::BookingSettings, interval::TimeInterval};
use crate::errors::{BookingError, BookingResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    #[default]
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Whether a booking in this state keeps its interval unavailable.
    pub fn blocks_slot(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(BookingError::Validation(format!(
                "Unknown booking status: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub date: NaiveDate,
    pub interval: TimeInterval,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// A validated booking that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub date: NaiveDate,
    pub interval: TimeInterval,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub booking_date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl CreateBookingRequest {
    /// Checks the request against the business calendar and turns it into a
    /// [`NewBooking`].
    ///
    /// The interval must be well formed and lie entirely on `booking_date` in
    /// the business time zone. `booking_date` must not be before the business
    /// day containing `now`, and the slot must not have started by `now`.
    pub fn validate(self, settings: &BookingSettings, now: DateTime<Utc>) -> BookingResult<NewBooking> {
        let guest_name = required("guestName", &self.guest_name)?;
        let guest_email = required("guestEmail", &self.guest_email)?;
        let guest_phone = required("guestPhone", &self.guest_phone)?;

        if !guest_email.contains('@') {
            return Err(BookingError::Validation(format!(
                "Invalid guest email: {}",
                guest_email
            )));
        }

        let interval = TimeInterval::new(self.start_time, self.end_time)?;

        // Slots never cross midnight, so both ends must share the booking date.
        if !settings.falls_on(&interval, self.booking_date) {
            return Err(BookingError::Validation(format!(
                "Booking time {} does not fall on {}",
                interval, self.booking_date
            )));
        }

        if self.booking_date < settings.today(now) {
            return Err(BookingError::Validation(format!(
                "Cannot book {}, the date is in the past",
                self.booking_date
            )));
        }

        if interval.has_started(now) {
            return Err(BookingError::Validation(format!(
                "Cannot book {}, the slot has already started",
                interval.label(&settings.timezone)
            )));
        }

        Ok(NewBooking {
            date: self.booking_date,
            interval,
            guest_name,
            guest_email: guest_email.to_lowercase(),
            guest_phone,
        })
    }
}

pub(crate) fn required(field: &str, value: &str) -> BookingResult<String> {
    let value = value.trim();
    if value.is_empty() {
        Err(BookingError::Validation(format!("{} is required", field)))
    } else {
        Ok(value.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingResponse {
    pub success: bool,
    pub message: String,
    pub booking_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: Uuid,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub booking_date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            guest_name: booking.guest_name,
            guest_email: booking.guest_email,
            guest_phone: booking.guest_phone,
            booking_date: booking.date,
            start_time: booking.interval.start(),
            end_time: booking.interval.end(),
            status: booking.status,
            created_at: booking.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListBookingsResponse {
    pub success: bool,
    pub bookings: Vec<BookingResponse>,
}
