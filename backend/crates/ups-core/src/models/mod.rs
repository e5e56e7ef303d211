pub mod address;
pub mod profile_view;
pub mod role;
pub mod us_state;
pub mod user_record;
