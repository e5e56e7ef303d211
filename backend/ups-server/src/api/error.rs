//! REST API error types
//!
//! Every failure leaves the service as `{"error": {"code", "message", "field"?}}`
//! with a status matching its kind.

use ups_auth::AuthError;
use ups_db::DbError;
use ups_profile::ProfileError;

use std::panic::Location;

use axum::{
    Json,
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR")
    pub code: String,
    pub message: String,
    /// Offending field for validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// 404
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Missing or invalid credentials (401)
    #[error("Unauthenticated: {message} {location}")]
    Unauthenticated {
        message: String,
        location: ErrorLocation,
    },

    /// Authenticated, but not the owner (403)
    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    /// 400
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Hashing or persistence failed during a profile update (500)
    #[error("Update failed: {message} {location}")]
    UpdateFailed {
        message: String,
        location: ErrorLocation,
    },

    /// Uploaded bytes could not be stored (500)
    #[error("Storage write failed: {message} {location}")]
    StorageWrite {
        message: String,
        location: ErrorLocation,
    },

    /// 409
    #[error("Conflict: {message} {location}")]
    Conflict {
        message: String,
        location: ErrorLocation,
    },

    /// 500
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    fn parts(self) -> (StatusCode, ApiErrorBody) {
        let (status, code, message, field) = match self {
            ApiError::NotFound { message, .. } => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", message, None)
            }
            ApiError::Unauthenticated { message, .. } => {
                (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", message, None)
            }
            ApiError::Unauthorized { message, .. } => {
                (StatusCode::FORBIDDEN, "UNAUTHORIZED", message, None)
            }
            ApiError::Validation { message, field, .. } => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message, field)
            }
            ApiError::UpdateFailed { message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "UPDATE_FAILED",
                message,
                None,
            ),
            ApiError::StorageWrite { message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_WRITE_FAILED",
                message,
                None,
            ),
            ApiError::Conflict { message, .. } => (StatusCode::CONFLICT, "CONFLICT", message, None),
            ApiError::Internal { message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                message,
                None,
            ),
        };

        (
            status,
            ApiErrorBody {
                code: code.to_string(),
                message,
                field,
            },
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Logged once here, with location
        match self {
            ApiError::Internal { .. }
            | ApiError::UpdateFailed { .. }
            | ApiError::StorageWrite { .. } => log::error!("{}", self),
            _ => log::warn!("{}", self),
        }

        let (status, body) = self.parts();
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

impl From<ProfileError> for ApiError {
    #[track_caller]
    fn from(e: ProfileError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        match e {
            ProfileError::NotFound { message, .. } => ApiError::NotFound { message, location },
            ProfileError::Unauthorized { message, .. } => {
                ApiError::Unauthorized { message, location }
            }
            ProfileError::Validation { message, field, .. } => ApiError::Validation {
                message,
                field,
                location,
            },
            ProfileError::UpdateFailed { message, .. } => {
                ApiError::UpdateFailed { message, location }
            }
            ProfileError::StorageWrite { message, .. } => {
                ApiError::StorageWrite { message, location }
            }
            ProfileError::Database { source, .. } => ApiError::from(source),
        }
    }
}

impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Hashing { .. } => ApiError::Internal {
                message: e.client_message(),
                location: ErrorLocation::from(Location::caller()),
            },
            _ => ApiError::Unauthenticated {
                message: e.client_message(),
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        log::error!("Database error: {}", e);

        match e {
            DbError::EmailAlreadyExists { email, .. } => ApiError::Conflict {
                message: format!("Email already exists: {}", email),
                location: ErrorLocation::from(Location::caller()),
            },
            DbError::UserNotFound { id, .. } => ApiError::NotFound {
                message: format!("User {} not found", id),
                location: ErrorLocation::from(Location::caller()),
            },
            // Don't expose internal database details to clients
            DbError::Sqlx { .. } | DbError::Migration { .. } | DbError::Initialization { .. } => {
                ApiError::Internal {
                    message: "Database operation failed".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    #[track_caller]
    fn from(e: JsonRejection) -> Self {
        ApiError::Validation {
            message: e.body_text(),
            field: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<MultipartRejection> for ApiError {
    #[track_caller]
    fn from(e: MultipartRejection) -> Self {
        ApiError::Validation {
            message: e.body_text(),
            field: Some("file".to_string()),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<MultipartError> for ApiError {
    #[track_caller]
    fn from(e: MultipartError) -> Self {
        ApiError::Validation {
            message: e.body_text(),
            field: Some("file".to_string()),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
