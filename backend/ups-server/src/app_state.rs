use ups_auth::{Argon2Hasher, JwtValidator};
use ups_db::UserRepository;
use ups_profile::{FileIngestion, ProfileService, UploadPolicy};

use std::sync::Arc;

use http::{HeaderMap, header};
use sqlx::SqlitePool;

/// Headroom over the file limit for multipart boundaries and part headers
pub const MULTIPART_OVERHEAD_BYTES: u64 = 64 * 1024;

/// Shared per-request state. Everything inside is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub profiles: ProfileService,
    pub uploads: FileIngestion,
    /// None = auth disabled, caller taken from `X-User-Email`
    pub jwt_validator: Option<Arc<JwtValidator>>,
    pub public_base_url: Option<String>,
}

impl AppState {
    pub fn new(
        pool: SqlitePool,
        policy: UploadPolicy,
        jwt_validator: Option<Arc<JwtValidator>>,
        public_base_url: Option<String>,
    ) -> Self {
        let store = Arc::new(UserRepository::new(pool.clone()));
        let profiles = ProfileService::new(store, Arc::new(Argon2Hasher::new()));
        let uploads = FileIngestion::new(profiles.clone(), policy);

        Self {
            pool,
            profiles,
            uploads,
            jwt_validator,
            public_base_url,
        }
    }

    /// Largest request body accepted on the upload route
    pub fn upload_body_limit(&self) -> usize {
        let limit = self.uploads.policy().max_file_size_bytes + MULTIPART_OVERHEAD_BYTES;
        usize::try_from(limit).unwrap_or(usize::MAX)
    }

    /// Origin that links to stored files are built on: the configured public
    /// base URL, else the request's Host header.
    pub fn base_url(&self, headers: &HeaderMap) -> String {
        if let Some(ref base) = self.public_base_url {
            return base.clone();
        }

        let host = headers
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .filter(|host| !host.is_empty())
            .unwrap_or("localhost");

        format!("http://{host}")
    }
}
