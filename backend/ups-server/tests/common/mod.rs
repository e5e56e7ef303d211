#![allow(dead_code)]

//! Test infrastructure for ups-server API tests

use ups_core::{Address, UsState, UserRecord};
use ups_db::UserRepository;
use ups_profile::UploadPolicy;
use ups_server::AppState;

use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tempfile::TempDir;

pub const OWNER: &str = "owner@example.com";
pub const STRANGER: &str = "stranger@example.com";
pub const BOUNDARY: &str = "ups-test-boundary";

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    ups_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Create AppState with auth disabled and uploads in a fresh temp dir.
/// Keep the TempDir alive for the duration of the test.
pub async fn create_test_app_state() -> (AppState, TempDir) {
    let pool = create_test_pool().await;
    let upload_dir = TempDir::new().expect("Failed to create upload dir");

    let policy = UploadPolicy {
        directory: upload_dir.path().to_path_buf(),
        max_file_size_bytes: 5 * 1024 * 1024,
        allowed_extensions: vec!["png".to_string(), "jpg".to_string()],
    };

    (AppState::new(pool, policy, None, None), upload_dir)
}

/// Create a test user with an address
pub async fn create_test_user(pool: &SqlitePool, email: &str) -> UserRecord {
    let mut user = UserRecord::new(email.to_string(), "not-a-real-digest".to_string());
    user.first_name = Some("Olive".to_string());
    user.last_name = Some("Owner".to_string());
    user.address = Some(Address {
        street_name: Some("1 Main St".to_string()),
        city_name: Some("Austin".to_string()),
        zipcode: Some(73301),
        state: Some(UsState::Texas),
        country: Some("USA".to_string()),
    });

    UserRepository::new(pool.clone())
        .create(&user)
        .await
        .expect("Failed to create test user")
}

/// Multipart body carrying a single `file` part
pub fn multipart_body(field: &str, file_name: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn upload_request(user_id: &str, caller: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/api/v1/user/uploadProfilePicture/{}", user_id))
        .header("X-User-Email", caller)
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
