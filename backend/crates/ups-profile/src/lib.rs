pub mod error;
pub mod file_ingestion;
pub mod profile_service;
pub mod upload_policy;


pub use error::{ProfileError, Result};
pub use file_ingestion::{FileIngestion, StoredPicture, UploadedFile};
pub use profile_service::ProfileService;
pub use upload_policy::UploadPolicy;

/// Confirmation returned by a successful profile update
pub const PROFILE_UPDATED_MESSAGE: &str = "Profile updated success.";
/// Confirmation returned by a successful picture upload
pub const FILE_UPLOADED_MESSAGE: &str = "File uploaded successfully.";
/// Path segment under which stored pictures are served
pub const UPLOADS_PATH_SEGMENT: &str = "/uploads/";
