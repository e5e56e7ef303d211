use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("Email already exists: {email} {location}")]
    EmailAlreadyExists {
        email: String,
        location: ErrorLocation,
    },

    #[error("User not found: {id} {location}")]
    UserNotFound { id: i64, location: ErrorLocation },
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl DbError {
    /// Message without the error location suffix
    pub fn client_message(&self) -> String {
        match self {
            Self::Sqlx { source, .. } => source.to_string(),
            Self::Migration { message, .. } | Self::Initialization { message, .. } => {
                message.clone()
            }
            Self::EmailAlreadyExists { email, .. } => format!("Email already exists: {}", email),
            Self::UserNotFound { id, .. } => format!("User {} not found", id),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
