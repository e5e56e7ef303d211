pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    error::ApiError,
    error::Result as ApiResult,
    extractors::caller::Caller,
    users::users::{get_profile, update_profile, upload_profile_picture},
};
pub use app_state::AppState;

pub use crate::routes::build_router;
