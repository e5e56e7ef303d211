use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_MAX_FILE_SIZE_BYTES,
    DEFAULT_UPLOAD_DIRECTORY, MAX_MAX_FILE_SIZE_BYTES,
};

use serde::Deserialize;

/// Profile picture upload limits and storage location
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Storage directory. Relative paths resolve against the config directory.
    pub directory: String,
    pub max_file_size_bytes: u64,
    /// Lower-case extensions without the dot
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            directory: String::from(DEFAULT_UPLOAD_DIRECTORY),
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl UploadConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.directory.trim().is_empty() {
            return Err(ConfigError::config("upload.directory cannot be empty"));
        }

        if self.max_file_size_bytes == 0 || self.max_file_size_bytes > MAX_MAX_FILE_SIZE_BYTES {
            return Err(ConfigError::config(format!(
                "upload.max_file_size_bytes must be 1-{}, got {}",
                MAX_MAX_FILE_SIZE_BYTES, self.max_file_size_bytes
            )));
        }

        if self.allowed_extensions.is_empty() {
            return Err(ConfigError::config(
                "upload.allowed_extensions must list at least one extension",
            ));
        }

        if let Some(bad) = self
            .allowed_extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.contains('.'))
        {
            return Err(ConfigError::config(format!(
                "upload.allowed_extensions entries must be non-empty and without '.', got '{}'",
                bad
            )));
        }

        Ok(())
    }

    /// Lower-case and trim extensions so comparisons against lower-cased
    /// file extensions hold
    pub(crate) fn normalize(&mut self) {
        for ext in &mut self.allowed_extensions {
            *ext = ext.trim().trim_start_matches('.').to_lowercase();
        }
    }
}
