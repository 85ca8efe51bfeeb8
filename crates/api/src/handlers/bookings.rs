use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use slotbook_core::{
    errors::BookingError,
    models::booking::{
        BookingResponse, CreateBookingRequest, CreateBookingResponse, ListBookingsResponse,
    },
};
use slotbook_db::repositories::booking as booking_repo;
use std::sync::Arc;
use tracing::info;

use super::{load_bookings, parse_date};
use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<CreateBookingResponse>), AppError> {
    let booking = payload.validate(&state.settings, Utc::now())?;

    // Check and insert happen under a per-day lock inside the repository
    let created = booking_repo::create_booking_if_available(&state.db_pool, &booking)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| {
            BookingError::Conflict(format!(
                "The time slot {} on {} is no longer available",
                booking.interval.label(&state.settings.timezone),
                booking.date
            ))
        })?;

    info!(
        "Booking confirmed: id={}, date={}, slot={}",
        created.id, created.booking_date, booking.interval
    );

    let response = CreateBookingResponse {
        success: true,
        message: "Booking confirmed!".to_string(),
        booking_id: created.id,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<ApiState>>,
    Path(date): Path<String>,
) -> Result<Json<ListBookingsResponse>, AppError> {
    let date = parse_date(&date)?;
    let bookings = load_bookings(&state.db_pool, date).await?;

    let response = ListBookingsResponse {
        success: true,
        bookings: bookings.into_iter().map(BookingResponse::from).collect(),
    };

    Ok(Json(response))
}
