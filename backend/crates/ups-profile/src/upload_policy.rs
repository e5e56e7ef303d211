use std::path::PathBuf;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Limits and destination applied to every uploaded picture
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub directory: PathBuf,
    pub max_file_size_bytes: u64,
    /// Lower-case extensions without the dot
    pub allowed_extensions: Vec<String>,
}

impl UploadPolicy {
    /// Limit in whole megabytes, as reported to clients
    pub fn max_file_size_mb(&self) -> u64 {
        self.max_file_size_bytes / BYTES_PER_MB
    }

    pub fn allows_extension(&self, extension: &str) -> bool {
        self.allowed_extensions.iter().any(|ext| ext == extension)
    }

    /// Allow-list rendered as `[png, jpg]`
    pub fn allowed_extensions_display(&self) -> String {
        format!("[{}]", self.allowed_extensions.join(", "))
    }
}
