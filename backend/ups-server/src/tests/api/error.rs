use crate::ApiError;

use ups_db::DbError;
use ups_profile::ProfileError;

use std::panic::Location;

use axum::response::IntoResponse;
use axum::http::StatusCode;
use error_location::ErrorLocation;
use http_body_util::BodyExt;

async fn render(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_not_found_returns_404_with_json_body() {
    let (status, json) = render(ApiError::NotFound {
        message: "User not found".into(),
        location: ErrorLocation::from(Location::caller()),
    })
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["message"], "User not found");
    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn test_validation_error_returns_400_with_field() {
    let (status, json) = render(ApiError::Validation {
        message: "Uploaded file is empty.".into(),
        field: Some("file".into()),
        location: ErrorLocation::from(Location::caller()),
    })
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "file");
}

#[tokio::test]
async fn test_auth_failures_split_into_401_and_403() {
    let (unauthenticated, json) = render(ApiError::Unauthenticated {
        message: "Missing Authorization header".into(),
        location: ErrorLocation::from(Location::caller()),
    })
    .await;
    assert_eq!(unauthenticated, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"]["code"], "UNAUTHENTICATED");

    let (unauthorized, json) = render(ApiError::Unauthorized {
        message: "You are not authorized to view this profile".into(),
        location: ErrorLocation::from(Location::caller()),
    })
    .await;
    assert_eq!(unauthorized, StatusCode::FORBIDDEN);
    assert_eq!(json["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_update_and_storage_failures_return_500_with_own_codes() {
    let (status, json) = render(ApiError::UpdateFailed {
        message: "Update Failure : disk I/O error".into(),
        location: ErrorLocation::from(Location::caller()),
    })
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "UPDATE_FAILED");
    assert_eq!(json["error"]["message"], "Update Failure : disk I/O error");

    let (status, json) = render(ApiError::StorageWrite {
        message: "Failed to upload file.".into(),
        location: ErrorLocation::from(Location::caller()),
    })
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "STORAGE_WRITE_FAILED");
}

#[test]
fn test_profile_errors_map_to_matching_api_errors() {
    let not_found: ApiError = ProfileError::NotFound {
        message: "User not found".into(),
        location: ErrorLocation::from(Location::caller()),
    }
    .into();
    assert!(matches!(not_found, ApiError::NotFound { .. }));

    let storage: ApiError = ProfileError::StorageWrite {
        message: "Failed to upload file.".into(),
        source: std::io::Error::other("disk full"),
        location: ErrorLocation::from(Location::caller()),
    }
    .into();
    assert!(matches!(storage, ApiError::StorageWrite { .. }));
}

#[test]
fn test_db_errors_hide_internals() {
    let conflict: ApiError = DbError::EmailAlreadyExists {
        email: "dup@example.com".into(),
        location: ErrorLocation::from(Location::caller()),
    }
    .into();
    assert!(matches!(conflict, ApiError::Conflict { .. }));

    let internal: ApiError = DbError::Migration {
        message: "checksum mismatch".into(),
        location: ErrorLocation::from(Location::caller()),
    }
    .into();
    match internal {
        ApiError::Internal { message, .. } => assert_eq!(message, "Database operation failed"),
        other => panic!("expected Internal, got {other:?}"),
    }
}
