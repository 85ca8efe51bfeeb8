mod bookings_test;
mod slots_test;
mod users_test;
