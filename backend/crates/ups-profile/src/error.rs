use ups_db::DbError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    /// Requested user does not exist
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Caller is not the owner of the record
    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Hashing or persistence failed after the record was found and authorized
    #[error("{message} {location}")]
    UpdateFailed {
        message: String,
        location: ErrorLocation,
    },

    /// The uploaded bytes could not be written to the upload directory
    #[error("{message}: {source} {location}")]
    StorageWrite {
        message: String,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Database error: {source} {location}")]
    Database {
        #[source]
        source: DbError,
        location: ErrorLocation,
    },
}

impl ProfileError {
    /// Message without the error location suffix
    pub fn client_message(&self) -> String {
        match self {
            Self::NotFound { message, .. }
            | Self::Unauthorized { message, .. }
            | Self::Validation { message, .. }
            | Self::UpdateFailed { message, .. }
            | Self::StorageWrite { message, .. } => message.clone(),
            Self::Database { source, .. } => source.client_message(),
        }
    }
}

impl From<DbError> for ProfileError {
    #[track_caller]
    fn from(source: DbError) -> Self {
        Self::Database {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProfileError>;
