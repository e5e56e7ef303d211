use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid token: {message} {location}")]
    InvalidToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("Missing credentials: {message} {location}")]
    MissingCredentials {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid authorization scheme: expected 'Bearer' {location}")]
    InvalidScheme { location: ErrorLocation },

    #[error("JWT decode failed: {source} {location}")]
    JwtDecode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Invalid claim '{claim}': {message} {location}")]
    InvalidClaim {
        claim: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Password hashing failed: {message} {location}")]
    Hashing {
        message: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Machine-readable code for client responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken { .. } => "INVALID_TOKEN",
            Self::TokenExpired { .. } => "TOKEN_EXPIRED",
            Self::MissingCredentials { .. } => "MISSING_CREDENTIALS",
            Self::InvalidScheme { .. } => "INVALID_AUTH_SCHEME",
            Self::JwtDecode { .. } => "JWT_DECODE_FAILED",
            Self::InvalidClaim { .. } => "INVALID_CLAIM",
            Self::Hashing { .. } => "HASHING_FAILED",
        }
    }

    /// Message without the error location suffix
    pub fn client_message(&self) -> String {
        match self {
            Self::InvalidToken { message, .. }
            | Self::MissingCredentials { message, .. }
            | Self::Hashing { message, .. } => message.clone(),
            Self::TokenExpired { .. } => "Token expired".to_string(),
            Self::InvalidScheme { .. } => {
                "Invalid authorization scheme: expected 'Bearer'".to_string()
            }
            Self::JwtDecode { source, .. } => format!("JWT decode failed: {}", source),
            Self::InvalidClaim { claim, message, .. } => {
                format!("Invalid claim '{}': {}", claim, message)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
