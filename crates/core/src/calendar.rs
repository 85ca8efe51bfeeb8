//! # Calendar State
//!
//! The month grid and the date/slot selection a booking client steps
//! through, kept as plain values so they can be driven and tested without a
//! renderer. The clock is never read here: every operation that depends on
//! "today" takes it as an argument.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;

use crate::{
    errors::{BookingError, BookingResult},
    models::{
        booking::CreateBookingRequest, business_hours::BookingSettings, interval::TimeInterval,
    },
};

/// Six weeks of seven days.
pub const GRID_CELLS: usize = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Previous,
    Current,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub kind: CellKind,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_selectable: bool,
}

/// A Sunday-first month view padded with the neighbouring months' days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub month: NaiveDate,
    pub title: String,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    /// Builds the grid for the month containing `month`.
    ///
    /// Only days of that month on or after `today` are selectable.
    pub fn build(month: NaiveDate, today: NaiveDate, selected: Option<NaiveDate>) -> Self {
        let first = first_of_month(month);
        let leading = u64::from(first.weekday().num_days_from_sunday());
        let grid_start = first.checked_sub_days(Days::new(leading)).unwrap_or(first);

        let cells = grid_start
            .iter_days()
            .take(GRID_CELLS)
            .map(|date| {
                let kind = match (date.year(), date.month()).cmp(&(first.year(), first.month())) {
                    std::cmp::Ordering::Less => CellKind::Previous,
                    std::cmp::Ordering::Equal => CellKind::Current,
                    std::cmp::Ordering::Greater => CellKind::Next,
                };

                DayCell {
                    date,
                    kind,
                    is_today: date == today,
                    is_selected: selected == Some(date),
                    is_selectable: kind == CellKind::Current && date >= today,
                }
            })
            .collect();

        Self {
            month: first,
            title: first.format("%B %Y").to_string(),
            cells,
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BookingSummary {
    pub date: NaiveDate,
    pub slot: TimeInterval,
}

/// Selection state of one booking client.
///
/// Choosing a new date always clears the chosen slot, so a summary can
/// never pair a date with a slot from another day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSession {
    displayed_month: NaiveDate,
    selected_date: Option<NaiveDate>,
    selected_slot: Option<TimeInterval>,
}

impl BookingSession {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            displayed_month: first_of_month(today),
            selected_date: None,
            selected_slot: None,
        }
    }

    pub fn displayed_month(&self) -> NaiveDate {
        self.displayed_month
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn selected_slot(&self) -> Option<TimeInterval> {
        self.selected_slot
    }

    pub fn previous_month(&mut self) {
        if let Some(month) = self.displayed_month.checked_sub_months(Months::new(1)) {
            self.displayed_month = month;
        }
    }

    pub fn next_month(&mut self) {
        if let Some(month) = self.displayed_month.checked_add_months(Months::new(1)) {
            self.displayed_month = month;
        }
    }

    pub fn grid(&self, today: NaiveDate) -> MonthGrid {
        MonthGrid::build(self.displayed_month, today, self.selected_date)
    }

    pub fn select_date(&mut self, date: NaiveDate, today: NaiveDate) -> BookingResult<()> {
        if date < today {
            return Err(BookingError::Validation(format!(
                "{} is in the past and cannot be selected",
                date
            )));
        }

        self.selected_date = Some(date);
        self.selected_slot = None;
        Ok(())
    }

    pub fn select_slot(&mut self, slot: TimeInterval, settings: &BookingSettings) -> BookingResult<()> {
        let date = self
            .selected_date
            .ok_or_else(|| BookingError::Validation("Select a date before a time slot".to_string()))?;

        if settings.local_date(slot.start()) != date {
            return Err(BookingError::Validation(format!(
                "Slot {} is not on the selected date {}",
                slot, date
            )));
        }

        self.selected_slot = Some(slot);
        Ok(())
    }

    pub fn summary(&self) -> Option<BookingSummary> {
        Some(BookingSummary {
            date: self.selected_date?,
            slot: self.selected_slot?,
        })
    }

    /// Turns the current selection into a booking request for the given guest.
    pub fn booking_request(
        &self,
        guest_name: &str,
        guest_email: &str,
        guest_phone: &str,
    ) -> BookingResult<CreateBookingRequest> {
        let summary = self.summary().ok_or_else(|| {
            BookingError::Validation("Select a date and time slot first".to_string())
        })?;

        Ok(CreateBookingRequest {
            guest_name: guest_name.to_string(),
            guest_email: guest_email.to_string(),
            guest_phone: guest_phone.to_string(),
            booking_date: summary.date,
            start_time: summary.slot.start(),
            end_time: summary.slot.end(),
        })
    }

    /// Clears the selection and keeps the displayed month.
    pub fn reset(&mut self) {
        self.selected_date = None;
        self.selected_slot = None;
    }
}
