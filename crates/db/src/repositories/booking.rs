use crate::models::DbBooking;
use chrono::{Datelike, NaiveDate, Utc};
use eyre::Result;
use slotbook_core::{
    availability::{bookings_on, is_available},
    models::booking::{Booking, BookingStatus, NewBooking},
};
use sqlx::{Executor, Pool, Postgres};
use tracing::debug;
use uuid::Uuid;

/// First key of the two-key advisory lock that serialises bookings per day.
const BOOKING_DAY_LOCK: i32 = 0x534c_4f54;

/// Inserts `booking` only if it overlaps no booking already held for its day.
///
/// The availability check and the insert run in one transaction holding an
/// advisory lock keyed by the booking date, so two concurrent requests for
/// the same day cannot both see the slot as free. Returns `None` when the
/// interval is taken.
pub async fn create_booking_if_available(
    pool: &Pool<Postgres>,
    booking: &NewBooking,
) -> Result<Option<DbBooking>> {
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock($1, $2)")
        .bind(BOOKING_DAY_LOCK)
        .bind(booking.date.num_days_from_ce())
        .execute(&mut *tx)
        .await?;

    let existing = select_bookings_by_date(&mut *tx, booking.date)
        .await?
        .into_iter()
        .map(Booking::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    if !is_available(&booking.interval, bookings_on(booking.date, &existing)) {
        debug!(
            "Booking rejected: {} overlaps an existing booking on {}",
            booking.interval, booking.date
        );
        tx.rollback().await?;
        return Ok(None);
    }

    let created = insert_booking(&mut *tx, booking).await?;
    tx.commit().await?;

    Ok(Some(created))
}

pub async fn get_bookings_by_date(pool: &Pool<Postgres>, date: NaiveDate) -> Result<Vec<DbBooking>> {
    debug!("Getting bookings for {}", date);
    select_bookings_by_date(pool, date).await
}

async fn insert_booking<'e, E>(executor: E, booking: &NewBooking) -> Result<DbBooking>
where
    E: Executor<'e, Database = Postgres>,
{
    let id = Uuid::new_v4();
    let now = Utc::now();

    let created = sqlx::query_as::<_, DbBooking>(
        r#"
        INSERT INTO bookings (
            id, guest_name, guest_email, guest_phone,
            booking_date, start_time, end_time, status, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, guest_name, guest_email, guest_phone,
                  booking_date, start_time, end_time, status, created_at
        "#,
    )
    .bind(id)
    .bind(&booking.guest_name)
    .bind(&booking.guest_email)
    .bind(&booking.guest_phone)
    .bind(booking.date)
    .bind(booking.interval.start())
    .bind(booking.interval.end())
    .bind(BookingStatus::Confirmed.as_str())
    .bind(now)
    .fetch_one(executor)
    .await?;

    debug!("Booking created: id={}, date={}", created.id, created.booking_date);
    Ok(created)
}

async fn select_bookings_by_date<'e, E>(executor: E, date: NaiveDate) -> Result<Vec<DbBooking>>
where
    E: Executor<'e, Database = Postgres>,
{
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, guest_name, guest_email, guest_phone,
               booking_date, start_time, end_time, status, created_at
        FROM bookings
        WHERE booking_date = $1
        ORDER BY start_time ASC
        "#,
    )
    .bind(date)
    .fetch_all(executor)
    .await?;

    Ok(bookings)
}
