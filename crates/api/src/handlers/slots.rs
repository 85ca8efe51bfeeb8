//! # Slot Listing
//!
//! Lays out a day's slots from the configured business hours and marks each
//! one available or taken. Slots that have already started are never
//! available.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use slotbook_core::{
    availability::{bookings_on, is_available},
    models::{
        booking::Booking,
        business_hours::BookingSettings,
        slot::{SlotListingResponse, SlotResponse},
    },
};
use std::sync::Arc;

use super::{load_bookings, parse_date};
use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
    Path(date): Path<String>,
) -> Result<Json<SlotListingResponse>, AppError> {
    let date = parse_date(&date)?;
    let bookings = load_bookings(&state.db_pool, date).await?;

    Ok(Json(build_slot_listing(
        &state.settings,
        date,
        &bookings,
        Utc::now(),
    )))
}

/// Pairs every slot of `date` with its availability as of `now`.
///
/// An empty `slots` list means the business offers nothing that day; it is
/// not an error.
pub fn build_slot_listing(
    settings: &BookingSettings,
    date: NaiveDate,
    bookings: &[Booking],
    now: DateTime<Utc>,
) -> SlotListingResponse {
    let slots = settings
        .slots_for(date)
        .map(|slot| SlotResponse {
            start: slot.start(),
            end: slot.end(),
            label: slot.label(&settings.timezone),
            available: !slot.has_started(now)
                && is_available(&slot, bookings_on(date, bookings)),
        })
        .collect();

    SlotListingResponse { date, slots }
}
