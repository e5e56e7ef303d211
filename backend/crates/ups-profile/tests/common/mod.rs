#![allow(dead_code)]

use ups_auth::{AuthError, PasswordHasher};
use ups_core::{Address, UsState, UserRecord};
use ups_db::{DbError, Result as DbErrorResult, UserRepository, UserStore};
use ups_profile::{FileIngestion, ProfileService, UploadPolicy};

use std::panic::Location;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread::ThreadId;

use async_trait::async_trait;
use error_location::ErrorLocation;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub const OWNER: &str = "owner@example.com";
pub const STRANGER: &str = "stranger@example.com";

/// Repository over an in-memory database with migrations applied
pub async fn create_test_repository() -> UserRepository {
    UserRepository::new(create_test_pool().await)
}

/// In-memory database with migrations applied
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    ups_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Stored owner with an address, returned with its assigned id
pub async fn seed_owner(repo: &UserRepository) -> UserRecord {
    let mut user = UserRecord::new(OWNER.to_string(), "old-digest".to_string());
    user.first_name = Some("Olive".to_string());
    user.last_name = Some("Owner".to_string());
    user.address = Some(Address {
        street_name: Some("1 Main St".to_string()),
        city_name: Some("Austin".to_string()),
        zipcode: Some(73301),
        state: Some(UsState::Texas),
        country: Some("USA".to_string()),
    });
    repo.create(&user).await.expect("Failed to seed owner")
}

/// Deterministic hasher so stored digests can be asserted
pub struct PrefixHasher;

impl PasswordHasher for PrefixHasher {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("hashed:{password}"))
    }
}

/// Records the thread every hash ran on
#[derive(Default)]
pub struct ThreadRecordingHasher {
    pub threads: Mutex<Vec<ThreadId>>,
}

impl PasswordHasher for ThreadRecordingHasher {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        self.threads
            .lock()
            .expect("hasher mutex poisoned")
            .push(std::thread::current().id());
        Ok(format!("hashed:{password}"))
    }
}

/// Reads from a real repository, fails every save
pub struct FailingSaveStore {
    pub inner: UserRepository,
}

#[async_trait]
impl UserStore for FailingSaveStore {
    async fn find_by_id(&self, id: i64) -> DbErrorResult<Option<UserRecord>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<UserRecord>> {
        self.inner.find_by_email(email).await
    }

    async fn save(&self, _user: &UserRecord) -> DbErrorResult<UserRecord> {
        Err(DbError::Initialization {
            message: "connection reset".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    async fn set_profile_picture(&self, id: i64, url: &str) -> DbErrorResult<()> {
        self.inner.set_profile_picture(id, url).await
    }
}

pub fn profile_service(store: Arc<dyn UserStore>) -> ProfileService {
    ProfileService::new(store, Arc::new(PrefixHasher))
}

pub fn file_ingestion(repo: UserRepository, directory: &Path) -> FileIngestion {
    let policy = UploadPolicy {
        directory: directory.to_path_buf(),
        max_file_size_bytes: 5 * 1024 * 1024,
        allowed_extensions: vec!["png".to_string(), "jpg".to_string()],
    };
    FileIngestion::new(profile_service(Arc::new(repo)), policy)
}
