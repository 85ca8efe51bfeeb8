use chrono::NaiveDate;
use mockall::mock;
use slotbook_core::models::{booking::NewBooking, user::NewUser};

use crate::models::{DbBooking, DbUser};

// Mock repositories for testing
mock! {
    pub BookingRepo {
        pub async fn create_booking_if_available(
            &self,
            booking: NewBooking,
        ) -> eyre::Result<Option<DbBooking>>;

        pub async fn get_bookings_by_date(
            &self,
            date: NaiveDate,
        ) -> eyre::Result<Vec<DbBooking>>;
    }
}

mock! {
    pub UserRepo {
        pub async fn create_user(
            &self,
            user: NewUser,
        ) -> eyre::Result<Option<DbUser>>;

        pub async fn get_user_by_email(
            &self,
            email: String,
        ) -> eyre::Result<Option<DbUser>>;
    }
}
