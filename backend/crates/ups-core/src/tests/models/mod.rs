mod profile_view;
mod role;
mod us_state;
