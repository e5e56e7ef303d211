//! User profile REST API handlers

use crate::{ApiError, ApiResult, AppState, Caller};

use ups_core::ProfileView;
use ups_profile::{FILE_UPLOADED_MESSAGE, UploadedFile};

use std::panic::Location;

use axum::{
    Json,
    extract::{
        Multipart, Path, State,
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
    },
    http::{HeaderMap, StatusCode},
};
use error_location::ErrorLocation;
use log::info;

const FILE_FIELD: &str = "file";

/// GET /api/v1/user/profile/{user_id}
///
/// Public view of the caller's own profile
pub async fn get_profile(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(user_id): Path<String>,
) -> ApiResult<Json<ProfileView>> {
    let user_id = parse_user_id(&user_id)?;

    let view = state.profiles.get_profile(user_id, &caller).await?;

    Ok(Json(view))
}

/// PUT /api/v1/user/update
///
/// Overwrite profile fields of the record matching the body's email
pub async fn update_profile(
    State(state): State<AppState>,
    Caller(caller): Caller,
    payload: Result<Json<ProfileView>, JsonRejection>,
) -> ApiResult<&'static str> {
    let Json(incoming) = payload?;

    Ok(state.profiles.update_profile(&caller, incoming).await?)
}

/// POST /api/v1/user/uploadProfilePicture/{user_id}
///
/// Store the multipart `file` field as the user's profile picture
pub async fn upload_profile_picture(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<&'static str> {
    let user_id = parse_user_id(&user_id)?;
    let mut multipart = multipart?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&state, e))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(&state, e))?;
        upload = Some(UploadedFile { file_name, bytes });
        break;
    }

    let file = upload.ok_or_else(|| ApiError::Validation {
        message: format!("Missing multipart field '{}'", FILE_FIELD),
        field: Some(FILE_FIELD.to_string()),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let declared_size = file.bytes.len() as u64;
    let base_url = state.base_url(&headers);

    let stored = state
        .uploads
        .upload_profile_picture(user_id, file, declared_size, &base_url)
        .await?;

    info!(
        "{} uploaded {} for user {} ({})",
        caller.email, stored.file_name, user_id, stored.url
    );

    Ok(FILE_UPLOADED_MESSAGE)
}

#[track_caller]
fn parse_user_id(raw: &str) -> ApiResult<i64> {
    raw.parse::<i64>().map_err(|_| ApiError::Validation {
        message: format!("Invalid user id: {}", raw),
        field: Some("userId".to_string()),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// A body cut off by the request limit reports the same limit as the
/// service's own size check
#[track_caller]
fn multipart_error(state: &AppState, e: MultipartError) -> ApiError {
    if e.status() != StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::from(e);
    }

    ApiError::Validation {
        message: format!(
            "File size exceeds the limit of {}MB.",
            state.uploads.policy().max_file_size_mb()
        ),
        field: Some(FILE_FIELD.to_string()),
        location: ErrorLocation::from(Location::caller()),
    }
}
