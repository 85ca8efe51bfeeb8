use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use pretty_assertions::assert_eq;
use slotbook_api::handlers::{into_bookings, slots::build_slot_listing};
use slotbook_core::models::{
    booking::Booking,
    business_hours::{BookingSettings, BusinessHours},
};

use crate::test_utils::{db_booking, TestContext};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 3, 4).unwrap()
}

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 3, 4, hour, minute, 0).unwrap()
}

fn long_ago() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap()
}

async fn stored_bookings(ctx: &mut TestContext) -> Vec<Booking> {
    ctx.booking_repo.expect_get_bookings_by_date().returning(|date| {
        Ok(vec![
            db_booking(date, at(10, 30), 90, "confirmed"),
            db_booking(date, at(15, 0), 90, "cancelled"),
        ])
    });

    let rows = ctx.booking_repo.get_bookings_by_date(day()).await.unwrap();
    into_bookings(rows).unwrap()
}

#[tokio::test]
async fn test_slot_listing_marks_booked_slots() {
    let mut ctx = TestContext::new();
    let bookings = stored_bookings(&mut ctx).await;

    let listing = build_slot_listing(&ctx.settings, day(), &bookings, long_ago());
    let availability: Vec<(String, bool)> = listing
        .slots
        .iter()
        .map(|slot| (slot.label.clone(), slot.available))
        .collect();

    assert_eq!(listing.date, day());
    assert_eq!(
        availability,
        vec![
            ("09:00 AM - 10:30 AM".to_string(), true),
            ("10:30 AM - 12:00 PM".to_string(), false),
            ("12:00 PM - 01:30 PM".to_string(), true),
            ("01:30 PM - 03:00 PM".to_string(), true),
            // The booking here was cancelled.
            ("03:00 PM - 04:30 PM".to_string(), true),
            ("04:30 PM - 06:00 PM".to_string(), true),
        ]
    );
}

#[tokio::test]
async fn test_started_slots_are_unavailable() {
    let mut ctx = TestContext::new();
    let bookings = stored_bookings(&mut ctx).await;

    let listing = build_slot_listing(&ctx.settings, day(), &bookings, at(12, 0));
    let available: Vec<bool> = listing.slots.iter().map(|slot| slot.available).collect();

    assert_eq!(available, vec![false, false, false, true, true, true]);
}

#[test]
fn test_misconfigured_hours_list_no_slots() {
    let settings = BookingSettings {
        business_hours: BusinessHours::new(18, 9).unwrap(),
        ..BookingSettings::default()
    };

    let listing = build_slot_listing(&settings, day(), &[], long_ago());

    assert!(listing.slots.is_empty());
}

#[test]
fn test_labels_follow_business_timezone() {
    let settings = BookingSettings {
        timezone: Tz::Europe__Berlin,
        ..BookingSettings::default()
    };

    let listing = build_slot_listing(&settings, day(), &[], long_ago());

    // Berlin is UTC+1 in March before the DST switch.
    assert_eq!(listing.slots[0].start, at(8, 0));
    assert_eq!(listing.slots[0].label, "09:00 AM - 10:30 AM");
}
