pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result};
pub use models::address::Address;
pub use models::profile_view::ProfileView;
pub use models::role::{Role, roles_from_tags, roles_to_tags};
pub use models::us_state::UsState;
pub use models::user_record::UserRecord;
