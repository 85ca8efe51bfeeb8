//! # Slotbook Core
//!
//! Pure scheduling logic for the Slotbook booking service: turning business
//! hours into bookable slots, checking candidate intervals against existing
//! bookings, and the month grid / selection state a booking client walks
//! through. Nothing in this crate performs I/O.

pub mod availability;
pub mod calendar;
pub mod errors;
pub mod models;
pub mod slots;
