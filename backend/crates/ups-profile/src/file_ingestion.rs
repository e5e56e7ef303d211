//! Profile picture uploads.
//!
//! A picture is checked against the [`UploadPolicy`], written under a
//! collision-free name, and its public URL recorded on the owning user.

use crate::{
    ProfileError, ProfileService, Result as ProfileErrorResult, UPLOADS_PATH_SEGMENT, UploadPolicy,
};

use std::panic::Location;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use error_location::ErrorLocation;
use log::{error, info};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use uuid::Uuid;

/// Characters left as-is in the URL path segment of a stored picture
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

const STORAGE_FAILED: &str = "Failed to upload file.";

/// A file as received from the client
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Where an accepted picture ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPicture {
    pub file_name: String,
    pub url: String,
    pub path: PathBuf,
}

#[derive(Clone)]
pub struct FileIngestion {
    profiles: ProfileService,
    policy: UploadPolicy,
}

impl FileIngestion {
    pub fn new(profiles: ProfileService, policy: UploadPolicy) -> Self {
        Self { profiles, policy }
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Validate, store, and link a new profile picture for `user_id`.
    ///
    /// `declared_size` is the size the client reported; the bytes actually
    /// received are checked for emptiness. `base_url` is the externally
    /// visible origin the returned URL is built on.
    pub async fn upload_profile_picture(
        &self,
        user_id: i64,
        file: UploadedFile,
        declared_size: u64,
        base_url: &str,
    ) -> ProfileErrorResult<StoredPicture> {
        let user = self.profiles.find_user(user_id).await?;

        if file.bytes.is_empty() {
            return Err(Self::invalid("Uploaded file is empty."));
        }

        if declared_size > self.policy.max_file_size_bytes {
            return Err(Self::invalid(format!(
                "File size exceeds the limit of {}MB.",
                self.policy.max_file_size_mb()
            )));
        }

        let original = Self::base_name(&file.file_name);
        let extension_allowed = Self::extension(original)
            .is_some_and(|ext| self.policy.allows_extension(&ext));
        if !extension_allowed {
            return Err(Self::invalid(format!(
                "Only {} files are allowed.",
                self.policy.allowed_extensions_display()
            )));
        }

        let stored_name = format!("{}_{}", Uuid::new_v4(), original);
        let path = self.policy.directory.join(&stored_name);
        Self::write(&self.policy.directory, &path, &file.bytes).await?;

        let url = format!(
            "{}{}{}",
            base_url.trim_end_matches('/'),
            UPLOADS_PATH_SEGMENT,
            utf8_percent_encode(&stored_name, PATH_SEGMENT)
        );

        self.profiles.assign_profile_picture(user.id, &url).await?;

        info!("Stored profile picture {} for user {}", stored_name, user_id);

        Ok(StoredPicture {
            file_name: stored_name,
            url,
            path,
        })
    }

    async fn write(directory: &Path, path: &Path, bytes: &[u8]) -> ProfileErrorResult<()> {
        let result = match tokio::fs::create_dir_all(directory).await {
            Ok(()) => tokio::fs::write(path, bytes).await,
            Err(e) => Err(e),
        };

        result.map_err(|source| {
            error!("Failed to write {}: {}", path.display(), source);
            ProfileError::StorageWrite {
                message: STORAGE_FAILED.to_string(),
                source,
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    /// Last path component of a client-supplied name, either separator
    fn base_name(file_name: &str) -> &str {
        file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(file_name)
            .trim()
    }

    fn extension(file_name: &str) -> Option<String> {
        file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }

    #[track_caller]
    fn invalid(message: impl Into<String>) -> ProfileError {
        ProfileError::Validation {
            message: message.into(),
            field: Some("file".to_string()),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
