use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use fake::{
    faker::{internet::en::SafeEmail, name::en::Name, phone_number::en::PhoneNumber},
    Fake,
};
use mockall::predicate;
use pretty_assertions::assert_eq;
use slotbook_api::{handlers::into_bookings, middleware::error_handling::AppError};
use slotbook_core::{
    errors::BookingError,
    models::booking::{BookingResponse, BookingStatus, CreateBookingRequest},
};
use uuid::Uuid;

use crate::test_utils::{db_booking, TestContext};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 3, 4).unwrap()
}

fn now() -> DateTime<Utc> {
    at(4, 6, 0)
}

fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 3, day, hour, minute, 0).unwrap()
}

fn request(date: NaiveDate, start: DateTime<Utc>, end: DateTime<Utc>) -> CreateBookingRequest {
    CreateBookingRequest {
        guest_name: Name().fake(),
        guest_email: SafeEmail().fake(),
        guest_phone: PhoneNumber().fake(),
        booking_date: date,
        start_time: start,
        end_time: end,
    }
}

// Mirrors the create handler with a fixed clock and the store replaced by the mock
async fn test_create_booking_wrapper(
    ctx: &TestContext,
    payload: CreateBookingRequest,
) -> Result<Uuid, AppError> {
    let booking = payload.validate(&ctx.settings, now())?;

    let created = ctx
        .booking_repo
        .create_booking_if_available(booking.clone())
        .await?
        .ok_or_else(|| {
            BookingError::Conflict(format!(
                "The time slot {} on {} is no longer available",
                booking.interval.label(&ctx.settings.timezone),
                booking.date
            ))
        })?;

    Ok(created.id)
}

#[tokio::test]
async fn test_create_booking_success() {
    let mut ctx = TestContext::new();
    let payload = request(today(), at(4, 10, 30), at(4, 12, 0));
    let expected = payload.clone().validate(&ctx.settings, now()).unwrap();
    let stored = db_booking(today(), at(4, 10, 30), 90, "confirmed");
    let stored_id = stored.id;

    ctx.booking_repo
        .expect_create_booking_if_available()
        .with(predicate::eq(expected))
        .times(1)
        .returning(move |_| Ok(Some(stored.clone())));

    let id = test_create_booking_wrapper(&ctx, payload).await.unwrap();

    assert_eq!(id, stored_id);
}

#[tokio::test]
async fn test_create_booking_conflict() {
    let mut ctx = TestContext::new();
    ctx.booking_repo
        .expect_create_booking_if_available()
        .times(1)
        .returning(|_| Ok(None));

    let result =
        test_create_booking_wrapper(&ctx, request(today(), at(4, 9, 0), at(4, 10, 30))).await;

    match result.unwrap_err().0 {
        BookingError::Conflict(message) => {
            assert!(message.contains("09:00 AM - 10:30 AM"));
        }
        e => panic!("Expected Conflict error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_create_booking_in_the_past_is_rejected_before_store() {
    let mut ctx = TestContext::new();
    ctx.booking_repo.expect_create_booking_if_available().never();
    let yesterday = NaiveDate::from_ymd_opt(2030, 3, 3).unwrap();

    let result =
        test_create_booking_wrapper(&ctx, request(yesterday, at(3, 9, 0), at(3, 10, 30))).await;

    match result.unwrap_err().0 {
        BookingError::Validation(_) => {}
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_create_booking_for_started_slot_is_rejected_before_store() {
    let mut ctx = TestContext::new();
    ctx.booking_repo.expect_create_booking_if_available().never();

    // Opened at 06:00, before the clock.
    let result =
        test_create_booking_wrapper(&ctx, request(today(), at(4, 5, 0), at(4, 6, 30))).await;

    match result.unwrap_err().0 {
        BookingError::Validation(message) => assert!(message.contains("already started")),
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_create_booking_store_failure() {
    let mut ctx = TestContext::new();
    ctx.booking_repo
        .expect_create_booking_if_available()
        .returning(|_| Err(eyre::eyre!("deadlock detected")));

    let result =
        test_create_booking_wrapper(&ctx, request(today(), at(4, 9, 0), at(4, 10, 30))).await;

    match result.unwrap_err().0 {
        BookingError::Database(_) => {}
        e => panic!("Expected Database error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_list_bookings_for_date() {
    let mut ctx = TestContext::new();
    ctx.booking_repo
        .expect_get_bookings_by_date()
        .with(predicate::eq(today()))
        .returning(|date| {
            Ok(vec![
                db_booking(date, at(4, 9, 0), 90, "confirmed"),
                db_booking(date, at(4, 12, 0), 90, "cancelled"),
            ])
        });

    let rows = ctx.booking_repo.get_bookings_by_date(today()).await.unwrap();
    let bookings: Vec<BookingResponse> = into_bookings(rows)
        .unwrap()
        .into_iter()
        .map(BookingResponse::from)
        .collect();

    assert_eq!(bookings.len(), 2);
    assert_eq!(bookings[0].start_time, at(4, 9, 0));
    assert_eq!(bookings[1].status, BookingStatus::Cancelled);
}

#[tokio::test]
async fn test_corrupt_stored_row_is_internal_error() {
    let rows = vec![db_booking(today(), at(4, 9, 0), 90, "archived")];

    match into_bookings(rows).unwrap_err() {
        BookingError::Internal(_) => {}
        e => panic!("Expected Internal error, got: {:?}", e),
    }
}
