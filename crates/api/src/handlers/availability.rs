//! # Availability Handlers
//!
//! Answers whether a candidate interval on a given day is still free.
//!
//! ## Checking Order
//!
//! 1. Parse the date and both instants from the path
//! 2. Build the candidate interval; a candidate whose start is not before
//!    its end is rejected with 400 before the store is queried
//! 3. Reject a candidate that does not lie on the requested day (400)
//! 4. A candidate that has already started is unavailable without a lookup
//! 5. Load the bookings held for that day and run the half-open overlap check
//!
//! A booking ending at 10:30 does not block a candidate starting at 10:30.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use slotbook_core::{
    availability::{bookings_on, is_available},
    errors::BookingError,
    models::{interval::TimeInterval, slot::AvailabilityResponse},
};
use std::sync::Arc;
use tracing::debug;

use super::{load_bookings, parse_date, parse_instant};
use crate::{middleware::error_handling::AppError, ApiState};

/// Checks a candidate interval against the day's bookings
///
/// # Endpoint
///
/// ```text
/// GET /api/availability/2030-03-04/2030-03-04T10:30:00Z/2030-03-04T12:00:00Z
/// ```
///
/// # Errors
///
/// * `BookingError::Validation` - Malformed date or timestamp, or a candidate
///   outside the requested day
/// * `BookingError::InvalidInterval` - Start is not before end
/// * `BookingError::Database` - The bookings could not be loaded
#[axum::debug_handler]
pub async fn check_availability(
    State(state): State<Arc<ApiState>>,
    Path((date, start, end)): Path<(String, String, String)>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let date = parse_date(&date)?;
    let start = parse_instant("start", &start)?;
    let end = parse_instant("end", &end)?;
    let candidate = TimeInterval::new(start, end)?;

    if !state.settings.falls_on(&candidate, date) {
        return Err(BookingError::Validation(format!(
            "Candidate {} does not fall on {}",
            candidate, date
        ))
        .into());
    }

    if candidate.has_started(Utc::now()) {
        debug!("Availability of {} on {}: already started", candidate, date);
        return Ok(Json(AvailabilityResponse { available: false }));
    }

    let bookings = load_bookings(&state.db_pool, date).await?;
    let available = is_available(&candidate, bookings_on(date, &bookings));

    debug!("Availability of {} on {}: {}", candidate, date, available);
    Ok(Json(AvailabilityResponse { available }))
}
