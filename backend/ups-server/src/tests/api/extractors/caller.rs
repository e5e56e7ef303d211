use crate::{ApiError, AppState, Caller};

use ups_auth::{Claims, JwtValidator};
use ups_profile::UploadPolicy;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{body::Body, extract::FromRequestParts, http::Request};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use sqlx::SqlitePool;

const SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";

async fn create_test_state(jwt_validator: Option<Arc<JwtValidator>>) -> AppState {
    let pool = SqlitePool::connect(":memory:")
        .await
        .expect("Failed to create test pool");

    let policy = UploadPolicy {
        directory: PathBuf::from("uploads"),
        max_file_size_bytes: 1024,
        allowed_extensions: vec!["png".to_string()],
    };

    AppState::new(pool, policy, jwt_validator, None)
}

fn token(sub: &str) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: sub.to_string(),
        exp: now + 3600,
        iat: now,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SECRET),
    )
    .unwrap()
}

async fn extract(state: &AppState, request: Request<Body>) -> Result<Caller, ApiError> {
    let (mut parts, _body) = request.into_parts();
    Caller::from_request_parts(&mut parts, state).await
}

#[tokio::test]
async fn test_extractor_with_email_header_when_auth_disabled() {
    let state = create_test_state(None).await;
    let request = Request::builder()
        .header("X-User-Email", " jane@example.com ")
        .body(Body::empty())
        .unwrap();

    let Caller(caller) = extract(&state, request).await.unwrap();

    assert_eq!(caller.email, "jane@example.com");
}

#[tokio::test]
async fn test_extractor_without_email_header_is_unauthenticated() {
    let state = create_test_state(None).await;
    let request = Request::builder().body(Body::empty()).unwrap();

    let result = extract(&state, request).await;

    assert!(matches!(result, Err(ApiError::Unauthenticated { .. })));
}

#[tokio::test]
async fn test_extractor_with_valid_bearer_token() {
    let state = create_test_state(Some(Arc::new(JwtValidator::with_hs256(SECRET)))).await;
    let request = Request::builder()
        .header("Authorization", format!("Bearer {}", token("jane@example.com")))
        .body(Body::empty())
        .unwrap();

    let Caller(caller) = extract(&state, request).await.unwrap();

    assert_eq!(caller.email, "jane@example.com");
}

#[tokio::test]
async fn test_extractor_ignores_email_header_when_auth_enabled() {
    let state = create_test_state(Some(Arc::new(JwtValidator::with_hs256(SECRET)))).await;
    let request = Request::builder()
        .header("X-User-Email", "jane@example.com")
        .body(Body::empty())
        .unwrap();

    let result = extract(&state, request).await;

    assert!(matches!(result, Err(ApiError::Unauthenticated { .. })));
}

#[tokio::test]
async fn test_extractor_rejects_token_signed_with_other_secret() {
    let state = create_test_state(Some(Arc::new(JwtValidator::with_hs256(
        b"another-secret-key-of-32-bytes-long",
    ))))
    .await;
    let request = Request::builder()
        .header("Authorization", format!("Bearer {}", token("jane@example.com")))
        .body(Body::empty())
        .unwrap();

    let result = extract(&state, request).await;

    assert!(matches!(result, Err(ApiError::Unauthenticated { .. })));
}
