//! Axum extractor for the authenticated caller

use crate::{ApiError, AppState};

use ups_auth::CallerIdentity;

use std::future::Future;
use std::panic::Location;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use error_location::ErrorLocation;

/// Development-mode identity header, honored only while auth is disabled
pub const USER_EMAIL_HEADER: &str = "X-User-Email";

/// Resolves the caller's identity for a request.
///
/// With auth enabled the `Authorization: Bearer <jwt>` header is required and
/// the token's `sub` claim is the caller's email. With auth disabled the
/// email is read from `X-User-Email`.
pub struct Caller(pub CallerIdentity);

impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let headers = &parts.headers;

            if let Some(ref validator) = state.jwt_validator {
                let authorization = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|value| value.to_str().ok())
                    .ok_or_else(|| ApiError::Unauthenticated {
                        message: "Missing Authorization header".to_string(),
                        location: ErrorLocation::from(Location::caller()),
                    })?;

                let claims = validator.validate_header(authorization)?;
                log::debug!("Authenticated {} via JWT", claims.sub);

                return Ok(Caller(CallerIdentity::from_claims(claims)));
            }

            let email = headers
                .get(USER_EMAIL_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|email| !email.is_empty())
                .ok_or_else(|| ApiError::Unauthenticated {
                    message: format!("Missing {} header", USER_EMAIL_HEADER),
                    location: ErrorLocation::from(Location::caller()),
                })?;

            log::debug!("Using caller from {} header: {}", USER_EMAIL_HEADER, email);

            Ok(Caller(CallerIdentity::new(email)))
        }
    }
}
