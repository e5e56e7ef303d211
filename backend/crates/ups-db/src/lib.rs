pub mod connection;
pub mod error;
pub mod repositories;
pub mod user_store;

pub use connection::{MIGRATOR, connect, run_migrations};
pub use error::{DbError, Result};
pub use repositories::user_repository::UserRepository;
pub use user_store::UserStore;
