pub mod booking;
pub mod business_hours;
pub mod interval;
pub mod slot;
pub mod user;
